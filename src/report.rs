//! 터미널 출력용 결과 렌더링

use checkmyroom_common::controller::status_icon;
use checkmyroom_common::history::{format_date, risk_label};
use checkmyroom_common::{annotate, AnalysisResult, HistoryItem, Segment, TermContext};

/// 렌더링된 본문과 처음 등장한 용어 설명 목록
#[derive(Debug, Default, PartialEq)]
pub struct Rendered {
    pub body: String,
    pub glossary: Vec<(String, &'static str)>,
}

/// 세그먼트를 평문으로. 용어는 `용어*` 로 표시하고 설명은 따로 모은다
pub fn render_segments(segments: &[Segment], out: &mut Rendered) {
    for segment in segments {
        match segment {
            Segment::Text(t) | Segment::Bold(t) => out.body.push_str(t),
            Segment::Term { term, definition, .. } => {
                out.body.push_str(term);
                out.body.push('*');
                out.glossary.push((term.clone(), definition));
            }
            Segment::LineBreak => out.body.push('\n'),
        }
    }
}

pub fn render_result(result: &AnalysisResult) -> Rendered {
    let mut ctx = TermContext::new();
    let mut out = Rendered::default();
    let mut block = |text: &str, key: &str, out: &mut Rendered| {
        render_segments(&annotate(text, key, &mut ctx), out);
        out.body.push('\n');
    };

    match result {
        AnalysisResult::Defect(r) if r.is_exception => {
            let message = r.exception_message.as_deref().unwrap_or_default();
            block(&format!("⚠️  {}", message), "exception", &mut out);
        }
        AnalysisResult::Defect(r) => {
            out.body.push_str("📩 집주인에게 보낼 문자\n");
            block(r.message_template.as_deref().unwrap_or_default(), "template", &mut out);
            if let Some(estimate) = &r.estimate_summary {
                block(&format!("💰 {}", estimate), "estimate", &mut out);
            }
            if let Some(note) = &r.estimate_note {
                block(note, "note", &mut out);
            }
        }
        AnalysisResult::Register(r) => {
            if let Some(score) = r.risk_score {
                out.body.push_str(&format!("위험도 {}점 {}\n", score, risk_label(Some(score))));
            }
            block(&r.summary, "summary", &mut out);
            for (idx, cp) in r.checkpoints.iter().enumerate() {
                let line = format!("{} {}: {}", status_icon(cp.status), cp.label, cp.detail);
                block(&line, &format!("cp-{}", idx), &mut out);
            }
        }
    }
    out
}

impl Rendered {
    pub fn print(&self) {
        print!("{}", self.body);
        if !self.glossary.is_empty() {
            println!("\n📖 용어 풀이");
            for (term, definition) in &self.glossary {
                println!("  * {}: {}", term, definition);
            }
        }
    }
}

/// 히스토리 목록 한 줄
pub fn history_line(index: usize, item: &HistoryItem) -> String {
    let date = format_date(&item.date.with_timezone(&chrono::Local));
    let kind = match item.kind {
        checkmyroom_common::AnalysisKind::Defect => "하자",
        checkmyroom_common::AnalysisKind::Register => "등기",
    };
    let risk = risk_label(item.risk_score);
    let mut line = format!("{}. [{}] {} {} - {}", index, kind, date, item.room_name, item.summary);
    if !risk.is_empty() {
        line.push_str(&format!(" ({})", risk));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkmyroom_common::{Checkpoint, CheckpointStatus, DefectResult, RegisterResult};

    #[test]
    fn test_register_terms_marked_once() {
        let result = AnalysisResult::Register(RegisterResult {
            risk_score: Some(40),
            summary: "근저당 설정이 있습니다.".into(),
            checkpoints: vec![Checkpoint {
                label: "근저당/담보권".into(),
                status: CheckpointStatus::Warning,
                detail: "근저당 채권최고액 확인 필요".into(),
            }],
        });

        let rendered = render_result(&result);
        assert!(rendered.body.starts_with("위험도 40점 🟡 주의\n"));
        assert!(rendered.body.contains("근저당* 설정이 있습니다."));
        assert!(rendered.body.contains("🟡 근저당/담보권: 근저당 채권최고액"));
        assert_eq!(rendered.glossary.len(), 1);
        assert_eq!(rendered.glossary[0].0, "근저당");
    }

    #[test]
    fn test_defect_exception() {
        let result = AnalysisResult::Defect(DefectResult::exception("방 사진이 아닙니다."));
        let rendered = render_result(&result);
        assert_eq!(rendered.body, "⚠️  방 사진이 아닙니다.\n");
        assert!(rendered.glossary.is_empty());
    }

    #[test]
    fn test_bold_rendered_plain() {
        let mut out = Rendered::default();
        render_segments(&checkmyroom_common::render_markdown("**주의**\n끝"), &mut out);
        assert_eq!(out.body, "주의\n끝");
    }
}
