//! Site characteristics and domain constants
//!
//! Fixed values of the hh.ru source schema and of the final skills table.

/// hh.ru site characteristics
pub mod site {
    /// Vacancy search URL template (`{keyword}` placeholder).
    ///
    /// `area=97` restricts results to Uzbekistan, `search_period=3` to the last three days.
    pub const SEARCH_URL_TEMPLATE: &str = "https://hh.ru/search/vacancy?text={keyword}&salary=&ored_clusters=true&items_on_page=100&order_by=publication_time&search_field=name&search_period=3&area=97&hhtmFrom=vacancy_search_list&hhtmFromLabel=vacancy_search_line";

    /// Search pages are 0-based (`&page=0` is the first page)
    pub const PAGE_NUMBERING_BASE: u32 = 0;
}

/// Final table constants
pub mod output {
    /// Every normalized row is tagged with this country
    pub const COUNTRY: &str = "Uzbekistan";

    /// Delimiter used when the skill list is stored as a single column
    pub const SKILL_DELIMITER: &str = ", ";

    /// Intermediate table header, in column order
    pub const INTERMEDIATE_HEADER: [&str; 9] = [
        "title",
        "company",
        "location",
        "salary",
        "required_experience",
        "skills",
        "time_posted",
        "link",
        "keyword",
    ];

    /// Final table header, in column order
    pub const FINAL_HEADER: [&str; 5] = ["time_posted", "keyword", "skills", "company", "country"];
}

/// Localized text constants
pub mod locale {
    /// Russian genitive month names and their English equivalents.
    ///
    /// Posting dates on hh.ru read like `15 марта 2024`.
    pub const RUSSIAN_GENITIVE_MONTHS: [(&str, &str); 12] = [
        ("января", "January"),
        ("февраля", "February"),
        ("марта", "March"),
        ("апреля", "April"),
        ("мая", "May"),
        ("июня", "June"),
        ("июля", "July"),
        ("августа", "August"),
        ("сентября", "September"),
        ("октября", "October"),
        ("ноября", "November"),
        ("декабря", "December"),
    ];

    /// Canonical date format of the final table
    pub const CANONICAL_DATE_FORMAT: &str = "%m/%d/%Y";

    /// Format the localized date is parsed with once month names are substituted
    pub const SOURCE_DATE_FORMAT: &str = "%d %B %Y";
}
