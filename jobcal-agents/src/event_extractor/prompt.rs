pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract event information from this captioning job email. Return ONLY a JSON object with these exact fields:

{{
  "date": "the date (e.g., 'June 24th' or 'April 8, 2025')",
  "time": "the time range (e.g., '2:00 PM to 3:30 PM')",
  "jobName": "the Customer/Organization name (e.g., 'US Patent and Trademark Office', 'inABLE')",
  "location": "meeting platform with key info (e.g., 'Zoom - Meeting ID: 123456')",
  "details": "formatted details with newlines between sections"
}}

CAPTIONING WORKFLOW RULES - Handle Multiple Formats:

FORMAT 1 (Organization style):
- Organization: [name] <- USE AS jobName
- Captioner Connection Time supersedes Scheduled Start

FORMAT 2 (Customer style):
- Customer: [name] <- USE AS jobName
- Job Title: [description] <- PUT IN details
- Use date/time from the header

ONLY INCLUDE IN DETAILS if the information actually exists:
- Event/Job Title (if found)
- Service Type/Service (if mentioned)
- Meeting Details (only fields that have real values - NO "N/A" or empty fields)
- Rate information (only if present)
- Meeting Link (only if an actual link exists)
- Contact information (only if present)
- Special instructions (only if present)

CRITICAL RULES:
- DO NOT include fields with "N/A" or empty values
- DO NOT create placeholder sections if information doesn't exist
- Only add sections that contain real, useful information
- If a meeting field is empty/missing, skip it entirely

Format details like:
"Event: [job title/event name]

Service: [service type]

Meeting Number: [number]
Password: [password]
Dial-in: [phone number]

Rate: [rate]

Contact: [contact info]

Meeting Link: [actual link]"

But only include the lines that have real data!

Email text:
{}
"#,
        text
    )
}
