//! fetch の薄いラッパー

use reunion_common::backend::error_from_response;
use reunion_common::ServiceError;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn network_error(e: JsValue) -> ServiceError {
    ServiceError::Network(
        e.as_string()
            .unwrap_or_else(|| format!("{:?}", e)),
    )
}

/// リクエストを送信する。2xx以外はエラーボディからメッセージを取り出す
pub async fn send(
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> Result<Response, ServiceError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
    for (name, value) in headers {
        request.headers().set(name, value).map_err(network_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ServiceError::Network("window unavailable".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    if !resp.ok() {
        let status = resp.status();
        let text = read_text(&resp).await.unwrap_or_default();
        return Err(error_from_response(status, &text));
    }
    Ok(resp)
}

pub async fn read_text(resp: &Response) -> Result<String, ServiceError> {
    let promise = resp.text().map_err(network_error)?;
    let value = JsFuture::from(promise).await.map_err(network_error)?;
    value
        .as_string()
        .ok_or_else(|| ServiceError::Decode("response body is not text".into()))
}

pub async fn read_json<T: DeserializeOwned>(resp: &Response) -> Result<T, ServiceError> {
    let promise = resp.json().map_err(network_error)?;
    let json = JsFuture::from(promise).await.map_err(network_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// 静的ファイルをテキストで取得
pub async fn get_text(url: &str) -> Result<String, ServiceError> {
    let resp = send("GET", url, &[], None).await?;
    read_text(&resp).await
}
