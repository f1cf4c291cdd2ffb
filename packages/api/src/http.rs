use domain::{AccountDirectory, BackendError, MailId, QuestBackend, QuestRecord, UniqueField};
use reqwest::{Client, Response, StatusCode};
use serde::de::IgnoredAny;
use serde::Serialize;

use crate::{ApiConfig, ApiError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportancePatch {
    is_important: bool,
}

/// `reqwest`-backed client for the quest REST service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_mails(&self) -> Result<Vec<QuestRecord>, ApiError> {
        let url = self.config.endpoint(&["mails"])?;
        let response = success(self.client.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    async fn get_mail(&self, id: &MailId) -> Result<QuestRecord, ApiError> {
        let url = self.config.endpoint(&["mails", id.as_str()])?;
        let response = success(self.client.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    async fn patch_importance(&self, id: &MailId, important: bool) -> Result<(), ApiError> {
        let url = self.config.endpoint(&["mails", id.as_str()])?;
        let body = ImportancePatch {
            is_important: important,
        };
        success(self.client.patch(url).json(&body).send().await?)?;
        Ok(())
    }

    async fn lookup_users(&self, field: UniqueField, value: &str) -> Result<usize, ApiError> {
        let url = self.config.endpoint(&["users"])?;
        let response = success(
            self.client
                .get(url)
                .query(&[(field.key(), value)])
                .send()
                .await?,
        )?;
        let matches: Vec<IgnoredAny> = response.json().await?;
        Ok(matches.len())
    }
}

fn success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

impl QuestBackend for HttpBackend {
    async fn fetch_mails(&self) -> Result<Vec<QuestRecord>, BackendError> {
        let mails = self.get_mails().await?;
        tracing::debug!("Fetched {} quests", mails.len());
        Ok(mails)
    }

    async fn fetch_mail(&self, id: &MailId) -> Result<QuestRecord, BackendError> {
        match self.get_mail(id).await {
            Err(ApiError::Status(StatusCode::NOT_FOUND)) => Err(BackendError::NotFound(id.clone())),
            other => other.map_err(BackendError::from),
        }
    }

    async fn set_important(&self, id: &MailId, important: bool) -> Result<(), BackendError> {
        Ok(self.patch_importance(id, important).await?)
    }
}

impl AccountDirectory for HttpBackend {
    async fn is_available(&self, field: UniqueField, value: &str) -> Result<bool, BackendError> {
        Ok(self.lookup_users(field, value).await? == 0)
    }
}
