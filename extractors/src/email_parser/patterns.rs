use regex::Regex;

/// All patterns the extractor knows, compiled once when the parser is built.
///
/// Labeled-line patterns deliberately stop at the end of the line: `.`
/// does not cross `\n`, so `Organization:\s*(.+)` captures one line only.
pub(crate) struct EmailPatterns {
    // "Organization:"-labeled notices
    pub organization: Regex,
    pub event_line: Regex,
    pub connection_time: Regex,
    pub scheduled_start: Regex,
    pub scheduled_end: Regex,

    // "Customer"-labeled job sheets
    pub customer: Regex,
    pub job_title: Regex,
    pub header_time: Regex,
    pub header_date: Regex,

    // Shared labeled fields
    pub service_type: Regex,
    pub service: Regex,
    pub meeting_number: Regex,
    pub password: Regex,
    pub dial_in: Regex,
    pub access_code: Regex,
    pub meeting_link_label: Regex,
    pub rate: Regex,
    pub client: Regex,
    pub poc: Regex,
    pub location_line: Regex,

    // Meeting links: literal URLs beat the labeled field
    pub url_patterns: Vec<Regex>,

    // Generic fallbacks
    pub subject_line: Regex,
    pub meeting_line: Regex,
    pub range_candidate: Regex,
    pub hhmm_ampm: Regex,
    pub fallback_date: Regex,
    pub date_in_time: Regex,
    pub slash_date: Regex,
}

impl EmailPatterns {
    pub fn compile() -> Self {
        Self {
            organization: Regex::new(r"(?i)Organization:\s*(.+)").unwrap(),
            event_line: Regex::new(r"(?i)Event:\s*(.+)").unwrap(),
            connection_time: Regex::new(r"(?i)Captioner Connection Time:\s*(.+)").unwrap(),
            scheduled_start: Regex::new(r"(?i)Scheduled Start:\s*(.+)").unwrap(),
            scheduled_end: Regex::new(r"(?i)Scheduled End:\s*(.+)").unwrap(),

            customer: Regex::new(r"(?i)Customer\s+(.+)").unwrap(),
            job_title: Regex::new(r"(?i)Job Title\s+(.+)").unwrap(),
            header_time: Regex::new(
                r"(?i)(\d{1,2}:\d{2}\s*(?:AM|PM))\s+to\s+(\d{1,2}:\d{2}\s*(?:AM|PM))",
            )
            .unwrap(),
            header_date: Regex::new(r"(?i)(\w+day,\s+\w+\s+\d{1,2},\s+\d{4})").unwrap(),

            service_type: Regex::new(r"(?i)Service Type:\s*(.+)").unwrap(),
            service: Regex::new(r"(?i)Service\s+(.+)").unwrap(),
            meeting_number: Regex::new(r"(?i)Meeting Number:\s*(.+)").unwrap(),
            password: Regex::new(r"(?i)Password:\s*(.+)").unwrap(),
            dial_in: Regex::new(r"(?i)Dial-In Info:\s*(.+)").unwrap(),
            access_code: Regex::new(r"(?i)Phone Access Code:\s*(.+)").unwrap(),
            meeting_link_label: Regex::new(r"(?i)Meeting Link\s+(.+)").unwrap(),
            rate: Regex::new(r"(?i)Rate\s+\$?([0-9.]+)").unwrap(),
            client: Regex::new(r"(?i)Client\s+(.+)").unwrap(),
            poc: Regex::new(r"(?i)On-Site POCs?\s+([\s\S]+?)(?:\n\w+\s+|$)").unwrap(),
            location_line: Regex::new(r"(?i)Location\s+(.+)").unwrap(),

            url_patterns: vec![
                Regex::new(r"(?i)(https?://[^\s]+)").unwrap(),
                Regex::new(r"(?i)([\w-]+\.zoom\.us/[^\s]+)").unwrap(),
                Regex::new(r"(?i)(teams\.microsoft\.com/[^\s]+)").unwrap(),
                Regex::new(r"(?i)(meet\.google\.com/[^\s]+)").unwrap(),
                Regex::new(r"(?i)(webex\.com/[^\s]+)").unwrap(),
            ],

            subject_line: Regex::new(r"(?i)(?:subject|re):\s*([^\n.!?]{5,50})").unwrap(),
            meeting_line: Regex::new(r"(?i)(?:meeting|event|appointment)[\s:]*([^\n.!?]{5,50})")
                .unwrap(),
            range_candidate: Regex::new(
                r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)?\s*(?:-|\u{2013}|\u{2014}|to)\s*\d{1,2}(?::\d{2})?\s*(?:am|pm)\b",
            )
            .unwrap(),
            hhmm_ampm: Regex::new(r"(?i)(\d{1,2}:\d{2}\s*(?:AM|PM))").unwrap(),
            fallback_date: Regex::new(
                r"(?i)\b\d{1,2}/\d{1,2}/\d{4}\b|\b\w+\s+\d{1,2},?\s+\d{4}\b",
            )
            .unwrap(),
            date_in_time: Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").unwrap(),
            slash_date: Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap(),
        }
    }
}
