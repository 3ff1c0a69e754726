use rust_decimal::Decimal;
use serde::Serialize;

use crate::features::quotations::model::Quotation;

const MONEY_SCALE: u32 = 2;

/// Financial block printed beside the terms of a quotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub subtotal: Decimal,
    pub ppn_percentage: Decimal,
    pub ppn_amount: Decimal,
    pub delivery_fee: Decimal,
    /// Server grand total when present, otherwise subtotal + PPN + delivery
    pub grand_total: Decimal,
    pub payment_percentage: Option<Decimal>,
    /// Amount due now: explicit nominal, else percentage of the grand total
    pub payment_due: Option<Decimal>,
}

fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    (amount * percentage / Decimal::ONE_HUNDRED).round_dp(MONEY_SCALE)
}

impl FinancialSummary {
    pub fn from_quotation(quotation: &Quotation) -> Self {
        let subtotal: Decimal = quotation.items.iter().map(|item| item.line_total()).sum();
        let ppn_percentage = quotation.ppn_percentage.unwrap_or(Decimal::ZERO);
        let ppn_amount = percent_of(subtotal, ppn_percentage);
        let delivery_fee = quotation.delivery_fee.unwrap_or(Decimal::ZERO);

        let grand_total = quotation
            .grand_total
            .unwrap_or(subtotal + ppn_amount + delivery_fee);

        let payment_due = quotation.payment_nominal.or_else(|| {
            quotation
                .payment_percentage
                .map(|pct| percent_of(grand_total, pct))
        });

        Self {
            subtotal,
            ppn_percentage,
            ppn_amount,
            delivery_fee,
            grand_total,
            payment_percentage: quotation.payment_percentage,
            payment_due,
        }
    }

    /// Label/value rows in print order
    pub fn rows(&self) -> Vec<(String, Decimal)> {
        let mut rows = vec![
            ("Subtotal".to_string(), self.subtotal),
            (format!("PPN {}%", self.ppn_percentage.normalize()), self.ppn_amount),
        ];
        if !self.delivery_fee.is_zero() {
            rows.push(("Delivery Fee".to_string(), self.delivery_fee));
        }
        rows.push(("Grand Total".to_string(), self.grand_total));
        if let Some(due) = self.payment_due {
            let label = match self.payment_percentage {
                Some(pct) => format!("Payment {}%", pct.normalize()),
                None => "Payment".to_string(),
            };
            rows.push((label, due));
        }
        rows
    }
}

/// Format an amount as Indonesian rupiah, e.g. `Rp 1.250.000,50`
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp(MONEY_SCALE);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w.to_string(), f.trim_end_matches('0').to_string()),
        None => (text.clone(), String::new()),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::from(if negative { "-Rp " } else { "Rp " });
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(&format!("{:0<2}", fraction));
    }
    out
}
