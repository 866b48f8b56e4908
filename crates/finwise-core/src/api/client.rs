//! Authenticated API client for the FinWise backend.
//!
//! Every request carries the current access token from the credential
//! store. An authentication failure is healed at most once per call by a
//! refresh exchange; if that is impossible the session is terminated.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{CredentialStore, SessionTerminator, TokenSlot};
use crate::config::Config;
use crate::models::{AccessToken, LoginRequest, RefreshRequest, TokenPair};

use super::request::REFRESH_PATH;
use super::transport::{HttpTransport, Transport};
use super::{ApiError, ApiResponse, RequestDescriptor};

/// Path of the login (token pair) endpoint
const LOGIN_PATH: &str = "login/";

/// Authentication handling phase of a single `send` call.
///
/// `Initial -> Retrying -> Done`, `Initial -> Terminated` and
/// `Retrying -> Terminated` are the only transitions; `Done` and
/// `Terminated` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Initial,
    Retrying,
    Terminated,
    Done,
}

impl AuthPhase {
    pub fn can_advance_to(self, next: AuthPhase) -> bool {
        matches!(
            (self, next),
            (AuthPhase::Initial, AuthPhase::Retrying)
                | (AuthPhase::Initial, AuthPhase::Terminated)
                | (AuthPhase::Initial, AuthPhase::Done)
                | (AuthPhase::Retrying, AuthPhase::Terminated)
                | (AuthPhase::Retrying, AuthPhase::Done)
        )
    }

    pub fn is_final(self) -> bool {
        matches!(self, AuthPhase::Terminated | AuthPhase::Done)
    }
}

/// Per-call context, passed by value so concurrent calls never share it.
#[derive(Debug, Clone, Copy)]
struct CallContext {
    phase: AuthPhase,
}

impl CallContext {
    fn new() -> Self {
        Self {
            phase: AuthPhase::Initial,
        }
    }

    fn advance(self, next: AuthPhase) -> Self {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal auth phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        Self { phase: next }
    }
}

/// API client for the FinWise backend.
/// Clone is cheap - all collaborators are shared behind Arc.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    terminator: Arc<dyn SessionTerminator>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        terminator: Arc<dyn SessionTerminator>,
    ) -> Self {
        Self {
            transport,
            store,
            terminator,
        }
    }

    /// Build a client talking HTTP to the configured backend
    pub fn from_config(
        config: &Config,
        store: Arc<dyn CredentialStore>,
        terminator: Arc<dyn SessionTerminator>,
    ) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(transport), store, terminator))
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Send a request with the current access token attached.
    ///
    /// Any response other than an authentication failure is returned as-is,
    /// including application errors. A first authentication failure is
    /// healed by one refresh exchange and one direct retry. When healing is
    /// impossible, or the retry fails authentication too, the credentials are
    /// cleared, the session terminator runs and
    /// `ApiError::SessionTerminated` is returned.
    pub async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let ctx = CallContext::new();

        let access = match self.store.get(TokenSlot::Access) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read access token, sending unauthenticated");
                None
            }
        };
        let outbound = request.with_bearer(access.as_deref())?;

        debug!(request = %outbound.describe(), authenticated = access.is_some(), "Transmitting");
        let response = self.transport.execute(&outbound).await?;

        if !response.is_auth_failure() {
            return Ok(Self::settle(ctx, response));
        }

        if outbound.targets_refresh() {
            Err(self.terminate(ctx, &outbound, response))
        } else {
            self.heal(ctx, &outbound, response).await
        }
    }

    fn settle(ctx: CallContext, response: ApiResponse) -> ApiResponse {
        let ctx = ctx.advance(AuthPhase::Done);
        debug!(phase = ?ctx.phase, status = response.status, "Response received");
        response
    }

    /// Refresh the access token and retransmit `request` once.
    async fn heal(
        &self,
        ctx: CallContext,
        request: &RequestDescriptor,
        failure: ApiResponse,
    ) -> Result<ApiResponse, ApiError> {
        debug!(request = %request.describe(), "Authentication failed, attempting token refresh");

        let refresh = match self.store.get(TokenSlot::Refresh) {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("No refresh token stored, cannot recover session");
                return Err(self.terminate(ctx, request, failure));
            }
            Err(e) => {
                warn!(error = %e, "Could not read refresh token");
                return Err(self.terminate(ctx, request, failure));
            }
        };

        let access = match self.exchange_refresh(&refresh).await {
            Ok(access) => access,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return Err(self.terminate(ctx, request, failure));
            }
        };

        if let Err(e) = self.store.set(TokenSlot::Access, &access) {
            // The rejected token must not be read back by the next call
            warn!(error = %e, "Could not persist refreshed access token");
            if let Err(e) = self.store.clear(TokenSlot::Access) {
                warn!(error = %e, "Could not clear rejected access token");
            }
        }
        info!("Access token refreshed");

        let ctx = ctx.advance(AuthPhase::Retrying);
        let retry = request.with_bearer(Some(&access))?;
        let response = self.transport.execute(&retry).await?;

        if response.is_auth_failure() {
            debug!(status = response.status, "Retry rejected as well");
            return Err(self.terminate(ctx, &retry, failure));
        }
        Ok(Self::settle(ctx, response))
    }

    /// Exchange the refresh token for a new access token. Sent straight to the
    /// transport so a failing exchange can never trigger another refresh.
    async fn exchange_refresh(&self, refresh: &str) -> Result<String, ApiError> {
        let request = RequestDescriptor::post(REFRESH_PATH).with_json(&RefreshRequest { refresh })?;
        let response = self.transport.execute(&request).await?.error_for_status()?;
        let token: AccessToken = response.json()?;
        Ok(token.access)
    }

    /// Clear credentials and end the session. `failure` is the call's first
    /// authentication failure; the returned error carries it.
    fn terminate(&self, ctx: CallContext, request: &RequestDescriptor, failure: ApiResponse) -> ApiError {
        let from = ctx.phase;
        let ctx = ctx.advance(AuthPhase::Terminated);
        warn!(
            request = %request.describe(),
            status = failure.status,
            from = ?from,
            phase = ?ctx.phase,
            "Authentication unrecoverable, ending session"
        );

        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "Failed to clear credentials");
        }
        self.terminator.terminate();

        ApiError::SessionTerminated {
            status: failure.status,
            body: failure.text(),
        }
    }

    // ===== Session =====

    /// Obtain a token pair for the given account and store it.
    /// Bypasses `send`: bad credentials are a plain `Unauthorized`, not a
    /// reason to refresh or terminate anything.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let request = RequestDescriptor::post(LOGIN_PATH).with_json(&LoginRequest { username, password })?;
        let response = self.transport.execute(&request).await?.error_for_status()?;
        let pair: TokenPair = response.json()?;
        self.store.store_pair(&pair)?;
        info!(username, "Logged in");
        Ok(pair)
    }

    /// Explicit logout: forget both tokens.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.store.clear_all()?;
        info!("Logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.has_session()
    }

    // ===== Typed helpers =====

    /// Send and decode a JSON body, mapping non-2xx statuses to `ApiError`
    pub async fn request_json<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T, ApiError> {
        self.send(request).await?.error_for_status()?.json()
    }

    /// Send and discard the body, mapping non-2xx statuses to `ApiError`
    pub async fn request_empty(&self, request: RequestDescriptor) -> Result<(), ApiError> {
        self.send(request).await?.error_for_status()?;
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(RequestDescriptor::get(path)).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(RequestDescriptor::post(path).with_json(body)?).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(RequestDescriptor::put(path).with_json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_empty(RequestDescriptor::delete(path)).await
    }
}
