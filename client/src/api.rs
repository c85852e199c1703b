use ecopack_shared::{FetchError, RankingRequest, RankingResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, FetchError> {
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    resp.json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// GET a JSON document.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    decode(resp).await
}

/// POST the form to the ranking endpoint.
pub async fn post_ranking(
    url: &str,
    request: &RankingRequest,
) -> Result<RankingResponse, FetchError> {
    let resp = Request::post(url)
        .json(request)
        .map_err(|e| FetchError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    decode(resp).await
}
