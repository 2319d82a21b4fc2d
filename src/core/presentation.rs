use crate::domain::model::Service;

/// en-US dollars with no decimals, e.g. `$12,345`.
pub fn format_usd(amount: u64) -> String {
    format!("${}", group_thousands(&amount.to_string()))
}

/// Per-square-foot rate with cents, e.g. `$0.19`.
pub fn format_rate(rate: f64) -> String {
    let rate = if rate.is_finite() { rate } else { 0.0 };
    let formatted = format!("{:.2}", rate);
    match formatted.split_once('.') {
        Some((whole, cents)) => format!("${}.{}", group_thousands(whole), cents),
        None => format!("${}", formatted),
    }
}

/// Square footage with separators; fractions keep up to two decimals.
pub fn format_sq_ft(size: f64) -> String {
    let size = if size.is_finite() && size > 0.0 { size } else { 0.0 };
    let formatted = format!("{:.2}", size);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    let number = match trimmed.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", group_thousands(whole), fraction),
        None => group_thousands(trimmed),
    };
    format!("{} sq ft", number)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Copy the quote form shows for each service line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCopy {
    pub heading: &'static str,
    pub size_label: &'static str,
    pub submit_label: &'static str,
    pub disclaimer: &'static str,
    pub confirmation: &'static str,
}

impl ServiceCopy {
    pub fn for_service(service: Service) -> Self {
        let disclaimer = "Final quote may vary after on-site assessment";
        let confirmation =
            "Thanks, your request is ready to send. We'll follow up with a confirmed quote shortly.";

        match service {
            Service::Residential => Self {
                heading: "Get Your Free Quote",
                size_label: "Property Size (sq ft)",
                submit_label: "Request Free Quote",
                disclaimer,
                confirmation,
            },
            Service::Construction => Self {
                heading: "Request a Quote",
                size_label: "Project Size (sq ft)",
                submit_label: "Request Quote",
                disclaimer,
                confirmation,
            },
        }
    }
}
