use super::patterns::EmailPatterns;

/// A captured label value counts only when it is non-empty and not an
/// "N/A"-style placeholder.
fn real_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().contains("n/a") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn captured(rx: &regex::Regex, text: &str) -> Option<String> {
    rx.captures(text).and_then(|c| real_value(&c[1]))
}

/// Assembles the details blob in a fixed section order, emitting only the
/// sections that have at least one real value. Placeholder noise in a
/// calendar description is worse than omission, so empty sections are
/// dropped entirely.
///
/// Section order: event title, service type, meeting info block, rate,
/// contact block, meeting link, original schedule.
pub(crate) fn assemble_details(
    patterns: &EmailPatterns,
    text: &str,
    original_schedule: Option<&str>,
) -> Option<String> {
    let mut sections: Vec<String> = Vec::new();

    // Job Title describes the event on Customer-style sheets; Event: is the
    // Organization-style equivalent.
    if let Some(title) = captured(&patterns.job_title, text) {
        sections.push(format!("Event: {}", title));
    } else if let Some(event) = captured(&patterns.event_line, text) {
        sections.push(format!("Event: {}", event));
    }

    if let Some(service) =
        captured(&patterns.service_type, text).or_else(|| captured(&patterns.service, text))
    {
        sections.push(format!("Service: {}", service));
    }

    let mut meeting_lines: Vec<String> = Vec::new();
    if let Some(number) = captured(&patterns.meeting_number, text) {
        meeting_lines.push(format!("Meeting Number: {}", number));
    }
    if let Some(password) = captured(&patterns.password, text) {
        meeting_lines.push(format!("Password: {}", password));
    }
    if let Some(dial_in) = captured(&patterns.dial_in, text) {
        meeting_lines.push(format!("Dial-in: {}", dial_in));
    }
    if let Some(code) = captured(&patterns.access_code, text) {
        meeting_lines.push(format!("Access Code: {}", code));
    }
    if !meeting_lines.is_empty() {
        sections.push(format!("Meeting Info:\n{}", meeting_lines.join("\n")));
    }

    if let Some(caps) = patterns.rate.captures(text) {
        sections.push(format!("Rate: ${}", &caps[1]));
    }

    let mut contact_lines: Vec<String> = Vec::new();
    if let Some(client) = captured(&patterns.client, text) {
        contact_lines.push(format!("Client: {}", client));
    }
    if let Some(poc_block) = captured(&patterns.poc, text) {
        let poc_lines: Vec<String> = poc_block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.to_lowercase().contains("n/a"))
            .map(str::to_string)
            .collect();
        if !poc_lines.is_empty() {
            contact_lines.push(format!("POC: {}", poc_lines.join(", ")));
        }
    }
    if !contact_lines.is_empty() {
        sections.push(format!("Contact:\n{}", contact_lines.join("\n")));
    }

    // Literal URLs anywhere in the body beat the labeled field; labels are
    // unreliable across dialects.
    if let Some(url) = find_meeting_url(patterns, text) {
        sections.push(format!("Meeting Link: {}", url));
    } else if let Some(label) = captured(&patterns.meeting_link_label, text) {
        if label.to_lowercase() != "meeting link" {
            sections.push(format!("Meeting Link: {}", label));
        }
    }

    if let Some(original) = original_schedule {
        sections.push(format!("Original Schedule: {}", original));
    }

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    }
}

pub(crate) fn find_meeting_url(patterns: &EmailPatterns, text: &str) -> Option<String> {
    patterns
        .url_patterns
        .iter()
        .find_map(|rx| rx.find(text))
        .map(|m| m.as_str().to_string())
}
