use rust_decimal_macros::dec;

use super::candidate::CandidateCompany;
use crate::types::{Market, Money};

fn entry(
    corp_code: &str,
    corp_name: &str,
    stock_code: &str,
    business_description: &str,
    scale: Money,
    keywords: &[&str],
) -> CandidateCompany {
    CandidateCompany {
        corp_code: corp_code.to_string(),
        corp_name: corp_name.to_string(),
        stock_code: stock_code.to_string(),
        market: Market::Kospi,
        business_description: business_description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        scale,
    }
}

/// The built-in candidate pool, in ranking tie-break order.
pub(crate) fn seed_candidates() -> Vec<CandidateCompany> {
    vec![
        entry(
            "00126380",
            "삼성전자",
            "005930",
            "전자제품 반도체 모바일 기기 제조",
            dec!(300000000000000),
            &["반도체", "전자", "모바일", "스마트폰", "가전"],
        ),
        entry(
            "000660",
            "SK하이닉스",
            "000660",
            "메모리 반도체 제조",
            dec!(150000000000000),
            &["반도체", "메모리", "칩", "SK"],
        ),
        entry(
            "00111754",
            "미래에셋증권",
            "006800",
            "금융투자 증권 중개 및 자산관리",
            dec!(100000000000000),
            &["증권", "금융", "투자", "주식", "자산"],
        ),
        entry(
            "005940",
            "NH투자증권",
            "005940",
            "증권 IB 자산관리",
            dec!(60000000000000),
            &["증권", "금융", "투자", "IB"],
        ),
        entry(
            "035420",
            "NAVER",
            "035420",
            "인터넷 포털 검색 AI 클라우드 서비스",
            dec!(9000000000000),
            &["포털", "검색", "AI", "인터넷", "광고"],
        ),
        entry(
            "035720",
            "카카오",
            "035720",
            "모바일 플랫폼 메신저 콘텐츠 모빌리티",
            dec!(8000000000000),
            &["메신저", "플랫폼", "모바일", "광고"],
        ),
        entry(
            "000270",
            "기아",
            "000270",
            "자동차 제조 및 판매",
            dec!(70000000000000),
            &["자동차", "차량", "제조"],
        ),
        entry(
            "051910",
            "LG화학",
            "051910",
            "석유화학 첨단소재 생명과학",
            dec!(50000000000000),
            &["화학", "소재", "배터리"],
        ),
        entry(
            "323410",
            "카카오뱅크",
            "323410",
            "인터넷 전문은행",
            dec!(2000000000000),
            &["은행", "금융", "모바일", "뱅킹"],
        ),
        entry(
            "377300",
            "카카오페이",
            "377300",
            "핀테크 간편결제",
            dec!(500000000000),
            &["핀테크", "결제", "금융"],
        ),
    ]
}
