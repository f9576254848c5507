use shared_types::ColumnMap;

/// Keyword lists per canonical field, matched as substrings of the
/// lower-cased header cell. Column mappings seen in real captioning job
/// spreadsheets.
const JOB_NAME_KEYWORDS: &[&str] = &[
    "organization",
    "customer",
    "client",
    "company",
    "job title",
    "event",
    "title",
    "subject",
];

const DATE_KEYWORDS: &[&str] = &[
    "date",
    "event date",
    "scheduled date",
    "day",
    "when",
    "begin date",
    "start date",
];

const START_TIME_KEYWORDS: &[&str] = &[
    "start time",
    "begin time",
    "scheduled start",
    "captioner connection time",
    "start",
    "begin",
];

const END_TIME_KEYWORDS: &[&str] = &["end time", "finish time", "scheduled end", "end", "finish"];

const TIME_RANGE_KEYWORDS: &[&str] = &["time range", "times", "schedule time", "event time"];

const TIME_KEYWORDS: &[&str] = &["time", "scheduled time"];

const LOCATION_KEYWORDS: &[&str] = &["location", "venue", "address", "platform", "meeting platform"];

const DETAILS_KEYWORDS: &[&str] = &[
    "details",
    "description",
    "notes",
    "job description",
    "meeting info",
    "special instructions",
    "comments",
];

/// Builds the per-file column map from a header row.
///
/// Each canonical field claims the first header matching one of its
/// keywords; later matches are ignored. A header containing "date" never
/// maps to a time field even when it also matches a time keyword ("Begin
/// Date" matches "begin"), and a header that reads like a time ("time",
/// "am", "pm") without containing "date" never maps to the date field.
pub fn build_column_map(headers: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (index, header) in headers.iter().enumerate() {
        let header = header.to_lowercase().trim().to_string();
        if header.is_empty() {
            continue;
        }

        let is_date_column = header.contains("date");
        let looks_like_time =
            header.contains("time") || header.contains("am") || header.contains("pm");

        let matches = |keywords: &[&str]| keywords.iter().any(|k| header.contains(k));

        if map.job_name.is_none() && matches(JOB_NAME_KEYWORDS) {
            map.job_name = Some(index);
        }
        if map.date.is_none() && (is_date_column || !looks_like_time) && matches(DATE_KEYWORDS) {
            map.date = Some(index);
        }
        if !is_date_column {
            if map.start_time.is_none() && matches(START_TIME_KEYWORDS) {
                map.start_time = Some(index);
            }
            if map.end_time.is_none() && matches(END_TIME_KEYWORDS) {
                map.end_time = Some(index);
            }
            if map.time_range.is_none() && matches(TIME_RANGE_KEYWORDS) {
                map.time_range = Some(index);
            }
            if map.time.is_none() && matches(TIME_KEYWORDS) {
                map.time = Some(index);
            }
        }
        if map.location.is_none() && matches(LOCATION_KEYWORDS) {
            map.location = Some(index);
        }
        if map.details.is_none() && matches(DETAILS_KEYWORDS) {
            map.details = Some(index);
        }
    }

    map
}
