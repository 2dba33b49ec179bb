//! `fubon login`, `login logout`, `login status`.

use fb_core::error::{FbError, FbResult};
use fb_core::logging::mask_identity;
use fb_core::session::Credentials;
use fb_sdk::BrokerSdk;
use serde_json::{Value, json};
use tracing::info;

use crate::cli::{LoginAction, LoginArgs};
use crate::dispatch::Dispatcher;

pub const LOGIN_USAGE: &str = "Missing required options. Usage: fubon login --id <ID> --password <PW> --cert-path <PATH> [--cert-password <PW>]";

pub async fn run<S: BrokerSdk>(args: LoginArgs, dispatcher: &mut Dispatcher<S>) -> FbResult<Value> {
    match args.action {
        Some(LoginAction::Logout) => logout(dispatcher),
        Some(LoginAction::Status) => status(dispatcher),
        None => login(args, dispatcher).await,
    }
}

async fn login<S: BrokerSdk>(args: LoginArgs, dispatcher: &mut Dispatcher<S>) -> FbResult<Value> {
    let (Some(personal_id), Some(password), Some(cert_path)) = (
        args.personal_id.filter(|s| !s.is_empty()),
        args.password.filter(|s| !s.is_empty()),
        args.cert_path.filter(|s| !s.is_empty()),
    ) else {
        return Err(FbError::Validation(LOGIN_USAGE.to_string()));
    };
    let credentials = Credentials::new(personal_id, password, cert_path, args.cert_password);

    let result = dispatcher.sdk_mut().login(&credentials).await?;
    if !result.is_success {
        return Err(FbError::login_rejected(result.message.as_deref()));
    }

    dispatcher.sessions().save(&credentials)?;
    info!("[login] session saved for {}", mask_identity(&credentials.personal_id));

    let accounts: Vec<Value> = result.data.iter().map(|a| a.to_json()).collect();
    Ok(json!({ "accounts": accounts }))
}

fn logout<S: BrokerSdk>(dispatcher: &Dispatcher<S>) -> FbResult<Value> {
    dispatcher.sessions().clear()?;
    Ok(json!({ "message": "Logged out successfully" }))
}

fn status<S: BrokerSdk>(dispatcher: &Dispatcher<S>) -> FbResult<Value> {
    Ok(match dispatcher.sessions().load()? {
        None => json!({ "logged_in": false }),
        Some(credentials) => json!({
            "logged_in": true,
            "personal_id": mask_identity(&credentials.personal_id),
            "cert_path": credentials.cert_path,
        }),
    })
}
