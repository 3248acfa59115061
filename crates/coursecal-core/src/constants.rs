/// Product identifier components shared across crates
pub const PRODUCT_NAME: &str = "coursecal";
pub const PRODUCT_DESCRIPTION: &str = "Student Schedule Exporter v1.0";
pub const DEFAULT_PRODID: &str =
    const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_DESCRIPTION, "//EN");

/// Name of the remote calendar that upload collaborators create or reuse.
pub const DEFAULT_CALENDAR_NAME: &str = "UofG Schedule";

/// Fixed zone used for provider payloads.
pub const DEFAULT_TIMEZONE: &str = "America/Toronto";

/// Suffix appended to every generated VEVENT UID.
pub const UID_DOMAIN: &str = "schedule";
