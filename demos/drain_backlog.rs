//! Demonstrates an arbiter with a tight burst limit draining a backlog of match lookups against
//! a mock API server while static-data calls bypass the quota.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use tokio::sync::mpsc;
// self
use request_arbiter::{
	arbiter::AdmissionController, config::RateLimit, request::Response, session::ApiSession,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let match_mock = server
		.mock_async(|when, then| {
			when.method(GET).path_includes("/api/lol/na/v2.2/match/");
			then.status(200).header("content-type", "application/json").body("{\"matchId\":42}");
		})
		.await;
	let controller = AdmissionController::builder()
		.rate_limit(RateLimit::new(2, Duration::from_secs(1)))
		.limit(5, Duration::from_secs(10))
		.build()?;
	let session = ApiSession::new(
		"00000000-1111-2222-3333-444444444444",
		Url::parse(&server.url("/api/lol/"))?,
		controller,
	);
	let (tx, mut rx) = mpsc::unbounded_channel();

	for id in 0..6 {
		let tx = tx.clone();
		let request = session.request(&format!("na/v2.2/match/{id}"), true)?;
		let admission = session.arbitrate(request, move |response: Response| {
			let _ = tx.send((id, response));
		})?;

		println!("match {id}: {admission:?}");
	}

	drop(tx);

	while let Some((id, response)) = rx.recv().await {
		println!(
			"match {id} answered with {:?} (backlog: {}).",
			response.status,
			session.controller().backlog_size()
		);
	}

	match_mock.assert_hits_async(6).await;

	Ok(())
}
