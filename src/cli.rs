use checkmyroom_common::checklist::{BuildingType, ContractType};
use checkmyroom_common::AnalysisKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checkmyroom")]
#[command(about = "자취방 하자·등기부등본 AI 분석 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTP 서버 실행
    Serve {
        /// 바인드 주소 (기본: 설정 파일의 bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// 사진을 직접 분석
    Analyze {
        /// 분석 타입 (defect/register)
        #[arg(required = true)]
        kind: AnalysisKind,

        /// 사진 파일 또는 폴더
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 방 이름 (히스토리 표시용)
        #[arg(short, long)]
        room: Option<String>,

        /// 히스토리에 저장하지 않음
        #[arg(long)]
        no_history: bool,
    },

    /// 계약 전 체크리스트
    Checklist {
        /// 계약 유형 (전세/월세, jeonse/wolse)
        #[arg(short, long, value_parser = parse_contract)]
        contract: Option<ContractType>,

        /// 건물 유형 (아파트/빌라/원룸, apartment/villa/oneroom)
        #[arg(short, long, value_parser = parse_building)]
        building: Option<BuildingType>,

        /// 항목을 대화형으로 체크
        #[arg(short, long)]
        toggle: bool,

        /// 현재 조합의 체크 상태 초기화
        #[arg(long)]
        reset: bool,
    },

    /// 최근 분석 히스토리
    History {
        /// 전체 삭제
        #[arg(long)]
        clear: bool,

        /// 항목 상세 보기 (목록 번호, 1부터)
        #[arg(short, long)]
        show: Option<usize>,
    },

    /// 설정 변경·표시
    Config {
        /// 사용할 Gemini 모델을 설정 파일에 저장
        #[arg(long)]
        set_model: Option<String>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}

/// 터미널 입력용 영문 별칭 허용
fn parse_contract(s: &str) -> Result<ContractType, String> {
    match s {
        "jeonse" => Ok(ContractType::Jeonse),
        "wolse" => Ok(ContractType::Wolse),
        other => other.parse(),
    }
}

fn parse_building(s: &str) -> Result<BuildingType, String> {
    match s {
        "apartment" => Ok(BuildingType::Apartment),
        "villa" => Ok(BuildingType::Villa),
        "oneroom" => Ok(BuildingType::OneRoom),
        other => other.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["checkmyroom", "analyze", "register", "a.jpg", "b.jpg", "--room", "302호"]);
        match cli.command {
            Commands::Analyze { kind, paths, room, no_history } => {
                assert_eq!(kind, AnalysisKind::Register);
                assert_eq!(paths.len(), 2);
                assert_eq!(room.as_deref(), Some("302호"));
                assert!(!no_history);
            }
            _ => panic!("analyze 로 파싱되어야 함"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["checkmyroom", "analyze", "photo", "a.jpg"]).is_err());
    }

    #[test]
    fn test_parse_checklist() {
        let cli = Cli::parse_from(["checkmyroom", "checklist", "-c", "월세", "-b", "villa"]);
        match cli.command {
            Commands::Checklist { contract, building, toggle, reset } => {
                assert_eq!(contract, Some(ContractType::Wolse));
                assert_eq!(building, Some(BuildingType::Villa));
                assert!(!toggle && !reset);
            }
            _ => panic!("checklist 로 파싱되어야 함"),
        }
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::parse_from(["checkmyroom", "config", "--set-model", "gemini-2.5-pro", "--show"]);
        match cli.command {
            Commands::Config { set_model, show } => {
                assert_eq!(set_model.as_deref(), Some("gemini-2.5-pro"));
                assert!(show);
            }
            _ => panic!("config 로 파싱되어야 함"),
        }
    }

    #[test]
    fn test_parse_checklist_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["checkmyroom", "checklist", "-c", "매매"]).is_err());
        assert!(Cli::try_parse_from(["checkmyroom", "checklist", "-b", "officetel"]).is_err());
    }
}
