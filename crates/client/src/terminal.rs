//! Terminal front end: reads commands from stdin, feeds server replies back
//! into the page, and redraws after every change.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::dispatch::{Dispatcher, Inbound};
use crate::page::{Command, Page};

fn show(page: &impl Page) {
    println!("\n{}\n", page.render());
}

/// Single-threaded event loop. Returns on `quit` or end of input.
pub async fn run<P: Page>(
    page: &mut P,
    dispatcher: &Dispatcher,
    mut inbound: UnboundedReceiver<Inbound>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    dispatcher.send_all(page.start());
    show(&*page);
    println!("{}", page.help());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", page.help()),
                    Ok(command) => {
                        dispatcher.send_all(page.handle(command));
                        show(&*page);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Some(reply) = inbound.recv() => {
                dispatcher.send_all(page.apply(reply));
                show(&*page);
            }
        }
    }

    tracing::info!("Bye");
    Ok(())
}
