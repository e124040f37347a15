use checkmyroom_common::{normalize_response, AnalysisRequest, AnalysisResult};

use crate::error::ModelError;
use crate::gemini::VisionModel;

/// 요청 하나를 모델에 보내고 응답을 정규화한다
///
/// 응답 형식이 기대와 달라도 거부하지 않고 경고 로그만 남긴다.
pub async fn run_analysis(
    model: &dyn VisionModel,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, ModelError> {
    let text = model.generate(&request.images, request.kind.prompt()).await?;
    let result = normalize_response(request.kind, &text);

    for warning in result.shape_warnings() {
        tracing::warn!(kind = %request.kind, %warning, "응답 형식 경고");
    }
    tracing::info!(
        kind = %request.kind,
        images = request.images.len(),
        exception = result.is_exception(),
        "분석 완료"
    );

    Ok(result)
}
