// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{Frequency, RecurringTemplate};

impl Frequency {
    /// How many occurrences fall in a typical month.
    pub fn monthly_multiplier(&self) -> Decimal {
        match self {
            Frequency::Daily => Decimal::from(30),
            Frequency::Weekly => Decimal::new(43, 1),
            Frequency::Monthly => Decimal::ONE,
            Frequency::Yearly => Decimal::ONE / Decimal::from(12),
        }
    }
}

impl RecurringTemplate {
    pub fn monthly_impact(&self) -> Decimal {
        match self.frequency {
            // Divide rather than multiply by a rounded twelfth
            Frequency::Yearly => self.amount / Decimal::from(12),
            _ => self.amount * self.frequency.monthly_multiplier(),
        }
    }
}

/// Combined monthly figure for a set of templates. Income and expense
/// templates are added together, the figure measures volume, not net flow.
pub fn total_monthly_impact(templates: &[RecurringTemplate]) -> Decimal {
    templates.iter().map(RecurringTemplate::monthly_impact).sum()
}
