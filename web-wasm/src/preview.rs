//! 사진 미리보기용 Object URL
//!
//! drop 되면 URL 을 해제한다. 컨트롤러가 사진을 지우거나
//! 초기화할 때 핸들이 drop 되므로 따로 정리할 필요가 없다.

use wasm_bindgen::JsValue;
use web_sys::{Blob, Url};

#[derive(Debug)]
pub struct PreviewUrl {
    url: String,
}

impl PreviewUrl {
    pub fn new(blob: &Blob) -> Result<Self, JsValue> {
        let url = Url::create_object_url_with_blob(blob)?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}
