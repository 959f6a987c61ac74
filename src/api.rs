//! REST client for the tracker services. Every authenticated call reads the
//! bearer token from the durable cross-tab store at call time; a missing
//! token surfaces as an auth error, which callers treat as the route guard's
//! redirect rather than a service failure.

use std::collections::BTreeMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{AppError, AppResult};
use crate::identity::LoginSuccess;
use crate::models::{
    Inscription, MiseAJourProfil, NouveauProjet, NouvelleTache, Profil, ProfilMisAJour, Projet,
    Tache,
};
use crate::storage::{keys, DurableStore};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    durable: DurableStore,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, durable: DurableStore) -> Self {
        Self {
            base_url: config.base_url.clone(),
            http: reqwest::Client::new(),
            durable,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn bearer(&self) -> AppResult<String> {
        self.durable
            .get(keys::ACCESS_TOKEN)
            .ok_or_else(|| AppError::auth("jeton d'accès absent"))
    }

    /// Decode a non-2xx body, preferring the `{errors: {...}}` shape the
    /// registration service returns.
    async fn read_error(resp: reqwest::Response) -> AppError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(map) = v.get("errors").and_then(|e| e.as_object()) {
                let errors: BTreeMap<String, String> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                    .collect();
                return AppError::invalid(errors);
            }
            if let Some(detail) = v.get("detail").and_then(|d| d.as_str()) {
                return AppError::from_status(status, detail.to_string());
            }
        }
        AppError::from_status(status, body)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> AppResult<T> {
        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }
        resp.json::<T>().await.map_err(AppError::from)
    }

    /// `POST token/`. Bad credentials map to the single banner message the
    /// login view shows.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginSuccess> {
        debug!(target: "cartable", "API POST token/");
        let resp = self
            .http
            .post(self.url("token/"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::BAD_REQUEST {
            return Err(AppError::auth("Nom d'utilisateur ou mot de passe incorrect"));
        }
        Self::decode(resp).await
    }

    /// `POST inscription/`. Local validation runs first; server-side field
    /// errors come back as the same map shape.
    pub async fn inscrire(&self, form: &Inscription) -> AppResult<()> {
        let errors = form.valider();
        if !errors.is_empty() {
            return Err(AppError::invalid(errors));
        }
        debug!(target: "cartable", "API POST inscription/");
        let resp = self
            .http
            .post(self.url("inscription/"))
            .json(&form.corps())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }
        Ok(())
    }

    /// `GET utilisateurs/me/`.
    pub async fn profil(&self) -> AppResult<Profil> {
        let token = self.bearer()?;
        debug!(target: "cartable", "API GET utilisateurs/me/");
        let resp = self
            .http
            .get(self.url("utilisateurs/me/"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// `PUT utilisateurs/update_profile/`, multipart. Optional parts are
    /// only appended when present, as the profile page does.
    pub async fn mettre_a_jour_profil(&self, upd: &MiseAJourProfil) -> AppResult<ProfilMisAJour> {
        let errors = upd.valider();
        if !errors.is_empty() {
            return Err(AppError::invalid(errors));
        }
        let token = self.bearer()?;
        let mut form = reqwest::multipart::Form::new()
            .text("first_name", upd.first_name.clone())
            .text("last_name", upd.last_name.clone());
        if let Some(d) = upd.date_naissance.clone() {
            form = form.text("date_naissance", d);
        }
        if let Some((filename, bytes)) = upd.avatar.clone() {
            let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
            form = form.part("avatar", part);
        }
        if let Some(current) = upd.current_password.clone().filter(|s| !s.is_empty()) {
            form = form.text("current_password", current);
        }
        if let Some(new) = upd.new_password.clone().filter(|s| !s.is_empty()) {
            form = form.text("new_password", new);
            form = form.text("confirm_password", upd.confirm_password.clone().unwrap_or_default());
        }
        debug!(target: "cartable", "API PUT utilisateurs/update_profile/");
        let resp = self
            .http
            .put(self.url("utilisateurs/update_profile/"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn projets(&self) -> AppResult<Vec<Projet>> {
        self.lister("projets/").await
    }

    pub async fn creer_projet(&self, projet: &NouveauProjet) -> AppResult<Projet> {
        self.creer("projets/", projet).await
    }

    pub async fn modifier_projet(&self, id: i64, projet: &NouveauProjet) -> AppResult<Projet> {
        self.modifier("projets", id, projet).await
    }

    pub async fn supprimer_projet(&self, id: i64) -> AppResult<()> {
        self.supprimer("projets", id).await
    }

    pub async fn taches(&self) -> AppResult<Vec<Tache>> {
        self.lister("taches/").await
    }

    pub async fn creer_tache(&self, tache: &NouvelleTache) -> AppResult<Tache> {
        self.creer("taches/", tache).await
    }

    pub async fn modifier_tache(&self, id: i64, tache: &NouvelleTache) -> AppResult<Tache> {
        self.modifier("taches", id, tache).await
    }

    pub async fn supprimer_tache(&self, id: i64) -> AppResult<()> {
        self.supprimer("taches", id).await
    }

    async fn lister<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<Vec<T>> {
        let token = self.bearer()?;
        debug!(target: "cartable", "API GET {}", endpoint);
        let resp = self
            .http
            .get(self.url(endpoint))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.log_network(endpoint, e))?;
        Self::decode(resp).await
    }

    async fn creer<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let token = self.bearer()?;
        debug!(target: "cartable", "API POST {}", endpoint);
        let resp = self
            .http
            .post(self.url(endpoint))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.log_network(endpoint, e))?;
        Self::decode(resp).await
    }

    async fn modifier<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        id: i64,
        body: &B,
    ) -> AppResult<T> {
        let token = self.bearer()?;
        let endpoint = format!("{}/{}/", collection, id);
        debug!(target: "cartable", "API PUT {}", endpoint);
        let resp = self
            .http
            .put(self.url(&endpoint))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| self.log_network(&endpoint, e))?;
        Self::decode(resp).await
    }

    async fn supprimer(&self, collection: &str, id: i64) -> AppResult<()> {
        let token = self.bearer()?;
        let endpoint = format!("{}/{}/", collection, id);
        debug!(target: "cartable", "API DELETE {}", endpoint);
        let resp = self
            .http
            .delete(self.url(&endpoint))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.log_network(&endpoint, e))?;
        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }
        Ok(())
    }

    fn log_network(&self, endpoint: &str, err: reqwest::Error) -> AppError {
        warn!(target: "cartable", "request to {} failed: {}", endpoint, err);
        AppError::from(err)
    }
}
