use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// 저장 프로시저 호출 파라미터 (위치 기반)
/// Stored procedure call parameter (positional)
///
/// 프로시저 시그니처와 순서가 정확히 일치해야 하며, 절대 재정렬되지 않습니다.
/// Ordering must match the procedure signature exactly; never reordered.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcParam {
    /// NULL 값
    /// NULL value
    Null,

    /// 문자열 값 (따옴표 이스케이프 후 인용됨)
    /// String value (quoted after escaping embedded quotes)
    Str(String),

    /// 숫자 값 (금액 등, 인용되지 않음)
    /// Numeric value (amounts etc., unquoted)
    Num(Decimal),

    /// UTC 타임스탬프 (초 단위로 잘림, 타임존 없음)
    /// UTC timestamp (truncated to whole seconds, timezone-naive)
    Date(DateTime<Utc>),

    /// 사전 직렬화된 JSON 문서
    /// Pre-serialized JSON document
    Json(String),
}

impl ProcParam {
    /// Optional 문자열을 파라미터로 변환 (None → NULL)
    /// Convert an optional string into a parameter (None → NULL)
    pub fn from_opt(value: Option<&str>) -> Self {
        match value {
            Some(v) => ProcParam::Str(v.to_string()),
            None => ProcParam::Null,
        }
    }

    /// 프로시저 호출 구문에 들어갈 리터럴 표현 생성
    /// Produce the literal representation for the CALL statement
    ///
    /// 날짜 포맷(초 정밀도, 타임존 없음)은 프로시저와의 호환성을 위해
    /// 고정된 와이어 포맷이므로 변경하면 안 됩니다.
    /// The date format (second precision, no timezone) is a fixed wire
    /// format shared with the procedures and must not change.
    pub fn encode(&self) -> String {
        match self {
            ProcParam::Null => "NULL".to_string(),
            ProcParam::Str(s) | ProcParam::Json(s) => {
                format!("'{}'", s.replace('\'', "''"))
            }
            ProcParam::Num(n) => n.to_string(),
            ProcParam::Date(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// 파라미터 목록을 CALL 구문으로 조립
/// Assemble a parameter list into a CALL statement
pub fn build_call(procedure: &str, params: &[ProcParam]) -> String {
    let args = params
        .iter()
        .map(ProcParam::encode)
        .collect::<Vec<_>>()
        .join(",");

    format!("CALL {}({})", procedure, args)
}
