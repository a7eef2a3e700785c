pub mod repertoire;

pub use repertoire::RepertoireClient;
