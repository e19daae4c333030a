// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use tracing::{error, info, warn};

use docwallet_client::logging::{init_logging, LogFormat};
use docwallet_client::{ClientConfig, WalletApp};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(LogFormat::from_env());

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let app = match WalletApp::start(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to start wallet client");
            return ExitCode::FAILURE;
        }
    };

    if !app.session.is_logged_in().await {
        info!("No persisted session; sign in to sync the wallet");
        return ExitCode::SUCCESS;
    }

    match app.subscription.get_signature().await {
        Some(subscription) => info!(
            plan = %subscription.plan_tier,
            signed_at = %subscription.signed_at,
            documents = subscription.document_count,
            "Subscription"
        ),
        None => warn!("No active subscription"),
    }

    let remote = app.documents.get_documents().await;
    info!(
        remote = remote.as_ref().map(Vec::len),
        validated = app.documents.get_validated_documents().len(),
        invalid = app.documents.get_invalid_documents().len(),
        "Wallet summary"
    );

    app.shutdown();
    ExitCode::SUCCESS
}
