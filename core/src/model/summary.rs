use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_employer: Decimal,
    pub total_employee: Decimal,
    pub total_combined: Decimal,
    pub included_count: usize,
}
