//! Column-header localization for period tables.

use crate::Language;

const THAI_COLUMN_LABELS: &[(&str, &str)] = &[
    ("cash", "เงินสด"),
    ("da", "ค่าเสื่อมราคาและค่าตัดจำหน่าย"),
    ("debt_to_equity", "หนี้สินต่อทุน (เท่า)"),
    ("equity", "ส่วนของผู้ถือหุ้น"),
    ("earning_per_share", "กำไรต่อหุ้น (บาท)"),
    ("earning_per_share_yoy", "กำไรต่อหุ้น YoY (%)"),
    ("earning_per_share_qoq", "กำไรต่อหุ้น QoQ (%)"),
    ("gpm", "อัตรากำไรขั้นต้น (%)"),
    ("gross_profit", "กำไรขั้นต้น"),
    ("net_profit", "กำไรสุทธิ"),
    ("net_profit_yoy", "กำไรสุทธิ YoY (%)"),
    ("net_profit_qoq", "กำไรสุทธิ QoQ (%)"),
    ("npm", "อัตรากำไรสุทธิ (%)"),
    ("revenue", "รายได้รวม"),
    ("revenue_yoy", "รายได้รวม YoY (%)"),
    ("revenue_qoq", "รายได้รวม QoQ (%)"),
    ("roa", "ROA (%)"),
    ("roe", "ROE (%)"),
    ("sga", "ค่าใช้จ่ายในการขายและบริหาร"),
    ("sga_per_revenue", "ค่าใช้จ่ายขายและบริหารต่อรายได้ (%)"),
    ("total_debt", "หนี้สินรวม"),
    ("dividend_yield", "อัตราเงินปันผลตอบแทน (%)"),
    ("book_value_per_share", "มูลค่าหุ้นทางบัญชีต่อหุ้น (บาท)"),
    ("close", "ราคาปิด (บาท)"),
    ("mkt_cap", "มูลค่าหลักทรัพย์ตามราคาตลาด"),
    ("price_earning_ratio", "P/E (เท่า)"),
    ("price_book_value", "P/BV (เท่า)"),
    ("ev_per_ebit_da", "EV/EBITDA (เท่า)"),
    ("ebit_dattm", "EBITDA"),
    ("paid_up_capital", "ทุนจดทะเบียนชำระแล้ว"),
    ("cash_cycle", "วงจรเงินสด (วัน)"),
    ("operating_activities", "กระแสเงินสดจากการดำเนินงาน"),
    ("investing_activities", "กระแสเงินสดจากการลงทุน"),
    ("financing_activities", "กระแสเงินสดจากการจัดหาเงิน"),
    ("asset", "สินทรัพย์รวม"),
    ("end_of_year_date", "วันสิ้นปีบัญชี"),
];

/// Header for metric column `key` in `language`. English headers are the
/// keys themselves; unknown keys pass through unchanged.
pub fn column_label(key: &str, language: Language) -> &str {
    match language {
        Language::En => key,
        Language::Th => THAI_COLUMN_LABELS
            .iter()
            .find(|(column, _)| *column == key)
            .map_or(key, |(_, label)| *label),
    }
}

/// Metric key for a header in either language.
pub fn column_key(label: &str) -> Option<&'static str> {
    let label = label.trim();
    THAI_COLUMN_LABELS
        .iter()
        .find(|(column, thai)| *column == label || *thai == label)
        .map(|(column, _)| *column)
}
