//! One authenticated session against a Harp server.
//!
//! The session derives the envelope key once at construction and holds it
//! (zeroized on drop) for the lifetime of the session. The KDF salt is part
//! of the account's portable key material: the same (password, salt) pair
//! must be used on every machine or envelopes written elsewhere will not
//! open.

use reqwest::{Client, RequestBuilder};
use zeroize::Zeroizing;

use harp_crypto::kdf::{derive_key, EnvelopeKey, SALT_LEN};
use harp_crypto::{open, seal};
use harp_proto::{
    DeleteKeyRequest, KeyEntry, ProjectLookup, ProjectSummary, RegisterRequest, WriteKeyRequest,
    AUTHORIZATION_HEADER, USERNAME_HEADER,
};

use crate::error::ClientError;

/// A decrypted secret.
#[derive(Debug)]
pub struct PlainKey {
    pub name: String,
    pub value: Zeroizing<String>,
}

pub struct Session {
    base_url: String,
    username: String,
    password: Zeroizing<String>,
    key: EnvelopeKey,
    http: Client,
}

impl Session {
    /// Derive the envelope key and probe the server's health endpoint.
    /// Fails fast on an unreachable server rather than on the first write.
    pub async fn connect(
        base_url: &str,
        username: &str,
        password: &str,
        salt: &[u8; SALT_LEN],
    ) -> Result<Self, ClientError> {
        let key = derive_key(password.as_bytes(), salt)?;
        let http = Client::builder().build()?;

        let session = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
            key,
            http,
        };

        let res = session.http.get(session.url("/health")).send().await?;
        expect_success(&res)?;
        Ok(session)
    }

    /// Register this session's identity on the server.
    pub async fn register(&self) -> Result<(), ClientError> {
        let res = self
            .http
            .post(self.url("/user"))
            .json(&RegisterRequest {
                username: self.username.clone(),
                authorization: self.password.to_string(),
            })
            .send()
            .await?;
        expect_success(&res)
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ClientError> {
        let res = self.authed(self.http.get(self.url("/projects"))).send().await?;
        expect_success(&res)?;
        Ok(res.json().await?)
    }

    pub async fn get_project(&self, project_id: i64) -> Result<ProjectLookup, ClientError> {
        let res = self
            .authed(self.http.get(self.url(&format!("/projects/{project_id}"))))
            .send()
            .await?;
        expect_success(&res)?;
        Ok(res.json().await?)
    }

    pub async fn create_project(&self, project_name: &str) -> Result<(), ClientError> {
        let res = self
            .authed(
                self.http
                    .put(self.url(&format!("/projects/create/{project_name}"))),
            )
            .send()
            .await?;
        expect_success(&res)
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<(), ClientError> {
        let res = self
            .authed(self.http.delete(self.url(&format!("/projects/{project_id}"))))
            .send()
            .await?;
        expect_success(&res)
    }

    /// Fetch and decrypt every secret under a project.
    pub async fn keys(&self, project_id: i64) -> Result<Vec<PlainKey>, ClientError> {
        let res = self
            .authed(
                self.http
                    .get(self.url(&format!("/projects/{project_id}/keys"))),
            )
            .send()
            .await?;
        expect_success(&res)?;
        let entries: Vec<KeyEntry> = res.json().await?;

        let mut keys = Vec::with_capacity(entries.len());
        for entry in entries {
            let plaintext = open(&self.key, &entry.key)?;
            let value = String::from_utf8(plaintext.to_vec()).map_err(|_| ClientError::NotUtf8)?;
            keys.push(PlainKey {
                name: entry.name,
                value: Zeroizing::new(value),
            });
        }
        Ok(keys)
    }

    /// Seal a secret under the session key and write it to the server.
    pub async fn write_key(
        &self,
        project_id: i64,
        name: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        let envelope = seal(&self.key, value.as_bytes())?;
        let res = self
            .authed(
                self.http
                    .put(self.url(&format!("/projects/{project_id}/key"))),
            )
            .json(&WriteKeyRequest {
                name: name.to_string(),
                key: envelope,
            })
            .send()
            .await?;
        expect_success(&res)
    }

    pub async fn delete_key(&self, project_id: i64, name: &str) -> Result<(), ClientError> {
        let res = self
            .authed(
                self.http
                    .delete(self.url(&format!("/projects/{project_id}/key"))),
            )
            .json(&DeleteKeyRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        expect_success(&res)
    }

    /// Fetch, decrypt, and render a project's secrets in dotenv form.
    /// Writing the file is the caller's business.
    pub async fn render_env(&self, project_id: i64) -> Result<Zeroizing<String>, ClientError> {
        let keys = self.keys(project_id).await?;
        Ok(render_env(&keys))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(USERNAME_HEADER, &self.username)
            .header(AUTHORIZATION_HEADER, self.password.as_str())
    }
}

/// Render decrypted secrets as `NAME="value"` lines.
pub fn render_env(keys: &[PlainKey]) -> Zeroizing<String> {
    let lines: Vec<String> = keys
        .iter()
        .map(|k| format!("{}=\"{}\"", k.name, k.value.as_str()))
        .collect();
    Zeroizing::new(lines.join("\n"))
}

fn expect_success(res: &reqwest::Response) -> Result<(), ClientError> {
    if res.status().is_success() {
        Ok(())
    } else {
        Err(ClientError::Api(res.status()))
    }
}
