//! 선택한 파일 → data URL

use gloo::file::futures::read_as_data_url;
use gloo::file::File;

pub async fn file_to_data_url(file: &web_sys::File) -> Result<String, String> {
    let file = File::from(file.clone());
    read_as_data_url(&file)
        .await
        .map_err(|e| format!("파일 읽기 실패: {}", e))
}
