//! `trackly health` -- confirm the API answers.

use serde::Serialize;

use trackly_api::IssuesClient;
use trackly_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct HealthReport<'a> {
    url: &'a str,
    status: String,
}

pub async fn handle(client: &IssuesClient, global: &GlobalOpts) -> Result<(), CliError> {
    let response = util::with_spinner(global, "Checking API", client.health())
        .await
        .map_err(CoreError::from)?;

    let report = HealthReport {
        url: client.base_url().as_str(),
        status: response.status,
    };
    let out = output::render_single(
        global.output(),
        &report,
        |r| format!("{} {}", r.url, r.status),
        |r| r.status.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
