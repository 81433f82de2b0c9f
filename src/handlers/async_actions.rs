use tokio::sync::mpsc;

use crate::api::HiAnimeClient;
use crate::app::{App, AsyncAction, Request};

/// Performs one request against the client and wraps the outcome.
pub async fn run_request(client: &HiAnimeClient, request: Request) -> AsyncAction {
    match request {
        Request::Home => {
            let (home, source) = client.get_home_page().await;
            AsyncAction::HomeLoaded(Box::new(home), source)
        }
        Request::Details { id } => match client.get_anime_details(&id).await {
            Ok(details) => AsyncAction::DetailsLoaded(id, Box::new(details)),
            Err(e) => {
                tracing::error!(%id, error = %e, "Error fetching anime details");
                AsyncAction::DetailsFailed(id, e.user_message("details"))
            }
        },
        Request::Search { query, page } => match client.search_anime(&query, page).await {
            Ok(results) => AsyncAction::SearchLoaded(query, page, results),
            Err(e) => {
                tracing::error!(%query, page, error = %e, "Error searching anime");
                AsyncAction::SearchFailed(query, page, e.user_message("search results"))
            }
        },
    }
}

/// Runs `request` on the tokio runtime; the result arrives on `tx`.
pub fn spawn_request(client: &HiAnimeClient, request: Request, tx: &mpsc::Sender<AsyncAction>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let action = run_request(&client, request).await;
        let _ = tx.send(action).await;
    });
}

pub fn handle_async_action(app: &mut App, action: AsyncAction) {
    match action {
        AsyncAction::HomeLoaded(home, source) => app.set_home(*home, source),
        AsyncAction::DetailsLoaded(id, details) => app.set_details(&id, *details),
        AsyncAction::DetailsFailed(id, message) => app.details_failed(&id, message),
        AsyncAction::SearchLoaded(query, page, results) => {
            app.set_search_results(&query, page, results)
        }
        AsyncAction::SearchFailed(query, page, message) => app.search_failed(&query, page, message),
    }
}
