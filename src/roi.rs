//! Return-on-investment estimate shown next to the audit form.

pub const WEEKS_PER_MONTH: f64 = 4.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiField {
    Hours,
    Hourly,
    Leads,
    Conversion,
    Deal,
    Monthly,
}

impl RoiField {
    pub const ALL: [RoiField; 6] = [
        RoiField::Hours,
        RoiField::Hourly,
        RoiField::Leads,
        RoiField::Conversion,
        RoiField::Deal,
        RoiField::Monthly,
    ];

    /// Input `name` in the form.
    pub fn name(self) -> &'static str {
        match self {
            RoiField::Hours => "hours",
            RoiField::Hourly => "hourly",
            RoiField::Leads => "leads",
            RoiField::Conversion => "conversion",
            RoiField::Deal => "deal",
            RoiField::Monthly => "monthly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoiField::Hours => "Heures de tâches manuelles par semaine",
            RoiField::Hourly => "Coût horaire (€)",
            RoiField::Leads => "Leads par mois",
            RoiField::Conversion => "Taux de conversion (%)",
            RoiField::Deal => "Panier moyen (€)",
            RoiField::Monthly => "Investissement mensuel (€)",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            RoiField::Hours => "10",
            RoiField::Hourly => "35",
            RoiField::Leads => "40",
            RoiField::Conversion => "5",
            RoiField::Deal => "1200",
            RoiField::Monthly => "490",
        }
    }
}

/// Raw text of the six inputs, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiDraft {
    values: [String; 6],
}

impl Default for RoiDraft {
    fn default() -> Self {
        Self {
            values: RoiField::ALL.map(|field| field.default_value().to_string()),
        }
    }
}

impl RoiDraft {
    pub fn get(&self, field: RoiField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: RoiField, value: String) {
        self.values[field as usize] = value;
    }

    pub fn inputs(&self) -> RoiInputs {
        RoiInputs {
            hours_per_week: parse_amount(self.get(RoiField::Hours)),
            hourly_rate: parse_amount(self.get(RoiField::Hourly)),
            monthly_leads: parse_amount(self.get(RoiField::Leads)),
            conversion_percent: parse_amount(self.get(RoiField::Conversion)),
            deal_value: parse_amount(self.get(RoiField::Deal)),
            monthly_cost: parse_amount(self.get(RoiField::Monthly)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoiInputs {
    pub hours_per_week: f64,
    pub hourly_rate: f64,
    pub monthly_leads: f64,
    pub conversion_percent: f64,
    pub deal_value: f64,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiEstimate {
    pub monthly_savings: f64,
    pub lead_revenue: f64,
    pub total_impact: f64,
    /// `(total - cost) / cost`, 0 without a cost.
    pub roi: f64,
    /// In months, 0 without any impact.
    pub payback_months: f64,
}

impl RoiInputs {
    pub fn estimate(&self) -> RoiEstimate {
        let monthly_savings = self.hours_per_week * self.hourly_rate * WEEKS_PER_MONTH;
        let lead_revenue = self.monthly_leads * (self.conversion_percent / 100.0) * self.deal_value;
        let total_impact = monthly_savings + lead_revenue;
        let roi = if self.monthly_cost > 0.0 {
            (total_impact - self.monthly_cost) / self.monthly_cost
        } else {
            0.0
        };
        let payback_months = if total_impact > 0.0 {
            self.monthly_cost / total_impact
        } else {
            0.0
        };

        RoiEstimate {
            monthly_savings,
            lead_revenue,
            total_impact,
            roi,
            payback_months,
        }
    }
}

impl RoiEstimate {
    pub fn roi_label(&self) -> String {
        format!("{}%", to_fixed(self.roi * 100.0, 0))
    }

    pub fn payback_label(&self) -> String {
        format!("{} sem.", to_fixed(self.payback_months * WEEKS_PER_MONTH, 1))
    }
}

/// Blank, unparsable and non-finite input all count as zero. Accepts a
/// decimal comma.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Whole euros, French grouping: `12 345 €`.
pub fn format_eur(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}€")
}

/// Rounds half away from zero, like `Number.prototype.toFixed`.
fn to_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", decimals, rounded)
}
