//! OAuth2 credential management, one token cache per account

use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use std::path::{Path, PathBuf};

use crate::error::{JobMailError, Result};

/// Read-only mail access is all the counter ever needs
pub const READONLY_SCOPES: &[&str] = &["https://www.googleapis.com/auth/gmail.readonly"];

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub =
    Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// Token cache path for one account: `token_<label>.json` under `token_dir`
///
/// The label keeps tokens for different accounts separate, e.g. "personal",
/// "university", "work".
pub fn token_cache_path(token_dir: &Path, account_label: &str) -> PathBuf {
    token_dir.join(format!("token_{}.json", account_label))
}

/// Obtain an authorized Gmail hub for one account
///
/// The authenticator handles the whole credential cascade: load the cached
/// token if present, silently refresh it when expired and a refresh token
/// exists, otherwise run the interactive flow (local callback listener plus
/// a browser consent page, blocking until the operator completes it). The
/// resulting token is persisted back to the per-account cache file.
///
/// # Errors
/// - `ConfigError` if the client-secret file is missing
/// - `AuthError` if refresh or interactive authorization cannot complete
///   (not retried; rerun after fixing the cause)
pub async fn acquire_session(
    account_label: &str,
    credentials_path: &Path,
    token_dir: &Path,
) -> Result<GmailHub> {
    if !credentials_path.exists() {
        return Err(JobMailError::ConfigError(format!(
            "{} not found. Download the OAuth client secret from Google Cloud Console \
             and place it there.",
            credentials_path.display()
        )));
    }

    let secret = yup_oauth2::read_application_secret(credentials_path)
        .await
        .map_err(|e| JobMailError::ConfigError(format!("Failed to read client secret: {}", e)))?;

    let token_path = token_cache_path(token_dir, account_label);

    // HTTPRedirect opens a browser for user authorization when no usable
    // token is cached
    let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
        secret,
        yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .persist_tokens_to_disk(&token_path)
    .build()
    .await
    .map_err(|e| JobMailError::AuthError(format!("Failed to build authenticator: {}", e)))?;

    // Force token acquisition now so any consent flow happens up front,
    // before the counting pipeline starts issuing API calls
    tracing::debug!(account = account_label, "Obtaining access token");
    let _token = auth
        .token(READONLY_SCOPES)
        .await
        .map_err(|e| JobMailError::AuthError(format!("Failed to obtain token: {}", e)))?;

    if token_path.exists() {
        secure_token_file(&token_path).await?;
    }

    // HTTP/1 for compatibility with google-gmail1
    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| JobMailError::AuthError(format!("Failed to load TLS roots: {}", e)))?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, auth))
}

/// Restrict the token cache to owner read/write on Unix
#[cfg(unix)]
pub async fn secure_token_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;
    Ok(())
}

/// Windows uses ACLs instead of Unix permissions; left as-is
#[cfg(windows)]
pub async fn secure_token_file(_path: &Path) -> Result<()> {
    Ok(())
}
