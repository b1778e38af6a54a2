//! Backend HTTP client
//!
//! One method per backend route. The bearer token lives in the session
//! cache, so a restarted client stays signed in until the token expires.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::model::{
    Article, ArticleChanges, ArticleStats, CachedUser, CurrentUser, GeneratedImage, NewArticle,
    Problem, SessionInfo, TextReply, TokenResponse, UserSummary,
};
use crate::session::SessionCache;
use crate::storage::KeyValueStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient<S> {
    http: Client,
    base_url: String,
    session: Arc<SessionCache<S>>,
}

impl<S> ApiClient<S>
where
    S: KeyValueStore,
{
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionCache<S>>) -> ClientResult<Self> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionCache<S>> {
        &self.session
    }

    // ------------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------------

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<CurrentUser> {
        let tokens: TokenResponse = self
            .send_json(
                self.request(Method::POST, "/auth/register")
                    .json(&json!({ "name": name, "email": email, "password": password })),
            )
            .await?;
        self.sign_in(tokens.access_token).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<CurrentUser> {
        let tokens: TokenResponse = self
            .send_json(
                self.request(Method::POST, "/auth/login")
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;
        self.sign_in(tokens.access_token).await
    }

    /// Tokens are stateless; signing out only forgets ours
    pub fn logout(&self) -> ClientResult<()> {
        self.session.set_current(None)
    }

    pub async fn me(&self) -> ClientResult<SessionInfo> {
        let token = self.token()?;
        self.send_json(self.request(Method::GET, "/auth/me").bearer_auth(token))
            .await
    }

    async fn sign_in(&self, access_token: String) -> ClientResult<CurrentUser> {
        let info: SessionInfo = self
            .send_json(
                self.request(Method::GET, "/auth/me")
                    .bearer_auth(&access_token),
            )
            .await?;

        let current = CurrentUser {
            user: CachedUser::from(&info),
            access_token: Some(access_token),
        };
        self.session.remember_user(current.user.clone())?;
        self.session.set_current(Some(current.clone()))?;
        tracing::info!(user_id = info.id, role = ?info.role, "Signed in");
        Ok(current)
    }

    // ------------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------------

    pub async fn list_articles(&self, category: Option<&str>) -> ClientResult<Vec<Article>> {
        let mut request = self.request(Method::GET, "/articles");
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        self.send_json(request).await
    }

    pub async fn article_stats(&self) -> ClientResult<ArticleStats> {
        self.send_json(self.request(Method::GET, "/articles/stats"))
            .await
    }

    pub async fn get_article(&self, id: i64) -> ClientResult<Article> {
        self.send_json(self.request(Method::GET, &format!("/articles/{id}")))
            .await
    }

    pub async fn create_article(&self, article: &NewArticle) -> ClientResult<Article> {
        self.send_json(self.authed(Method::POST, "/articles")?.json(article))
            .await
    }

    pub async fn update_article(&self, id: i64, changes: &ArticleChanges) -> ClientResult<Article> {
        self.send_json(
            self.authed(Method::PUT, &format!("/articles/{id}"))?
                .json(changes),
        )
        .await
    }

    pub async fn delete_article(&self, id: i64) -> ClientResult<()> {
        self.send_empty(self.authed(Method::DELETE, &format!("/articles/{id}"))?)
            .await
    }

    // ------------------------------------------------------------------------
    // Users (Owner)
    // ------------------------------------------------------------------------

    /// Also refreshes the cached user list
    pub async fn list_users(&self) -> ClientResult<Vec<UserSummary>> {
        let users: Vec<UserSummary> = self.send_json(self.authed(Method::GET, "/users")?).await?;

        let mut cached: Vec<CachedUser> = users.iter().map(CachedUser::from).collect();
        if let Some(current) = self.session.current_user() {
            cached.push(current.user);
        }
        cached.sort_by_key(|u| u.id);
        self.session.replace_users(cached)?;
        Ok(users)
    }

    pub async fn promote_user(&self, id: i64) -> ClientResult<UserSummary> {
        self.change_role(id, "promote").await
    }

    pub async fn demote_user(&self, id: i64) -> ClientResult<UserSummary> {
        self.change_role(id, "demote").await
    }

    async fn change_role(&self, id: i64, action: &str) -> ClientResult<UserSummary> {
        let user: UserSummary = self
            .send_json(self.authed(Method::PUT, &format!("/users/{id}/{action}"))?)
            .await?;
        self.session.remember_user(CachedUser::from(&user))?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.send_empty(self.authed(Method::DELETE, &format!("/users/{id}"))?)
            .await?;
        self.session.forget_user(id)
    }

    // ------------------------------------------------------------------------
    // AI
    // ------------------------------------------------------------------------

    pub async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> ClientResult<GeneratedImage> {
        self.send_json(
            self.authed(Method::POST, "/ai/generate-image")?
                .json(&json!({ "prompt": prompt, "aspectRatio": aspect_ratio })),
        )
        .await
    }

    pub async fn ask(&self, prompt: &str) -> ClientResult<TextReply> {
        self.send_json(
            self.request(Method::POST, "/ai/ask")
                .json(&json!({ "prompt": prompt })),
        )
        .await
    }

    pub async fn security_report(&self) -> ClientResult<TextReply> {
        self.send_json(self.authed(Method::POST, "/ai/report")?)
            .await
    }

    /// Content with its `![gen-image: ...]` tags resolved; Admin or Owner only
    pub async fn render_content(&self, content: &str) -> ClientResult<String> {
        #[derive(serde::Deserialize)]
        struct Rendered {
            content: String,
        }

        let rendered: Rendered = self
            .send_json(
                self.authed(Method::POST, "/ai/render-content")?
                    .json(&json!({ "content": content })),
            )
            .await?;
        Ok(rendered.content)
    }

    pub async fn health(&self) -> ClientResult<bool> {
        let response = self.request(Method::GET, "/health").send().await?;
        Ok(response.status().is_success())
    }

    // ------------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn token(&self) -> ClientResult<String> {
        self.session.access_token().ok_or(ClientError::NotSignedIn)
    }

    fn authed(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        Ok(self.request(method, path).bearer_auth(self.token()?))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        check(request.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ClientError::Api`
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let problem: Problem = response.json().await.unwrap_or_default();
    let detail = problem
        .detail
        .or(problem.title)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
        action: problem.action,
    })
}
