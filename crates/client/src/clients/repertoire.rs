use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use chess_core::protocol::{
    Candidates, Endpoint, FormFields, LoadKind, MoveReply, MoveRequest, OpeningList,
    OpeningRequest, PositionReply, PositionRequest, Verdict,
};

use crate::config::Config;
use crate::error::ClientError;

/// HTTP access to the repertoire server. One method per endpoint shape;
/// every call is a form-encoded POST answered with JSON.
pub struct RepertoireClient {
    client: Client,
    base_url: String,
}

impl RepertoireClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.server_url.clone(),
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        form: FormFields,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!(%url, ?form, "POST");

        let resp = self.client.post(&url).form(&form).send().await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.path(),
                status: resp.status(),
            });
        }

        let text = resp.text().await?;
        tracing::debug!(%url, body = %text, "reply");

        serde_json::from_str(&text).map_err(|source| ClientError::Decode {
            endpoint: endpoint.path(),
            source,
        })
    }

    /// POST /moves
    pub async fn moves(&self, request: &MoveRequest) -> Result<MoveReply, ClientError> {
        self.post(Endpoint::Moves, request.form()).await
    }

    /// POST /opening with no fields (initial fetch) or `{color, name}`
    /// (create). Both answer with the full list.
    pub async fn openings(&self, request: &OpeningRequest) -> Result<OpeningList, ClientError> {
        self.post(Endpoint::Opening, request.form()).await
    }

    /// POST /opening `{opening, color}`: candidate moves of one opening.
    pub async fn opening_candidates(
        &self,
        request: &OpeningRequest,
    ) -> Result<Candidates, ClientError> {
        self.post(Endpoint::Opening, request.form()).await
    }

    /// POST /positions `{load}`
    pub async fn load_position(&self, kind: LoadKind) -> Result<PositionReply, ClientError> {
        self.post(Endpoint::Positions, PositionRequest::Load(kind).form())
            .await
    }

    /// POST /positions `{performance, move}`. The reply carries nothing the
    /// client acts on, so it is handed back as raw JSON.
    pub async fn report_performance(
        &self,
        verdict: Verdict,
        mv: &str,
    ) -> Result<Value, ClientError> {
        let request = PositionRequest::Performance {
            verdict,
            mv: mv.to_string(),
        };
        self.post(Endpoint::Positions, request.form()).await
    }
}
