/// File and directory names under the data directory.
/// These are the contract shared with the web front end.
pub const AGENCY_LIST_FILE: &str = "agency-list.json";
pub const SUBAGENCY_LISTINGS_DIR: &str = "agency-subagencies";
pub const AGENCY_DETAILS_DIR: &str = "agencies";
pub const BRAIN_DRAIN_FILE: &str = "brain-drain.json";
pub const GEOGRAPHIC_IMPACT_FILE: &str = "geographic-impact.json";
pub const STATES_FILE: &str = "states.json";
pub const STATE_DETAIL_DIR: &str = "state-detail";
pub const OCCUPATIONS_FILE: &str = "occupations.json";
pub const SEPARATIONS_FILE: &str = "separations.json";
pub const STATE_IMPACT_FILE: &str = "state-impact.json";
pub const OCCUPATION_FAMILIES_FILE: &str = "occupation-families.json";
pub const AGENCY_RISK_FILE: &str = "agency-risk.json";
pub const COMPARISONS_DIR: &str = "comparisons";
pub const COMPARISONS_INDEX_FILE: &str = "index.json";
pub const CSV_DIR: &str = "csv";

// Collection keys inside aggregate documents
pub const BRAIN_DRAIN_COLLECTION: &str = "agency_brain_drain";
pub const SEPARATIONS_BY_LOCATION: &str = "separations_by_location";

// Sentinel values the source dataset uses for invalid or unreported rows
pub const INVALID_CODE: &str = "*";
pub const NO_DATA_REPORTED_CODE: &str = "NDR";
pub const INVALID_NAME: &str = "invalid";
pub const INVALID_FAMILY: &str = "Invalid";
pub const INVALID_STATE: &str = "INVALID";
pub const NO_DATA_REPORTED_STATE: &str = "NO DATA REPORTED";

/// Length of the parent agency prefix in a subagency code (e.g. "DJ" in "DJ15").
pub const PARENT_CODE_LEN: usize = 2;

/// Number of sample rows echoed to the operator after a rewrite.
pub const SAMPLE_SIZE: usize = 10;

/// Occupations listed under `topOccupations` in a family rollup.
pub const TOP_OCCUPATIONS: usize = 10;

/// Two-digit FIPS state codes to postal abbreviations (50 states + DC).
pub const FIPS_TO_STATE: &[(&str, &str)] = &[
    ("01", "AL"), ("02", "AK"), ("04", "AZ"), ("05", "AR"), ("06", "CA"),
    ("08", "CO"), ("09", "CT"), ("10", "DE"), ("11", "DC"), ("12", "FL"),
    ("13", "GA"), ("15", "HI"), ("16", "ID"), ("17", "IL"), ("18", "IN"),
    ("19", "IA"), ("20", "KS"), ("21", "KY"), ("22", "LA"), ("23", "ME"),
    ("24", "MD"), ("25", "MA"), ("26", "MI"), ("27", "MN"), ("28", "MS"),
    ("29", "MO"), ("30", "MT"), ("31", "NE"), ("32", "NV"), ("33", "NH"),
    ("34", "NJ"), ("35", "NM"), ("36", "NY"), ("37", "NC"), ("38", "ND"),
    ("39", "OH"), ("40", "OK"), ("41", "OR"), ("42", "PA"), ("44", "RI"),
    ("45", "SC"), ("46", "SD"), ("47", "TN"), ("48", "TX"), ("49", "UT"),
    ("50", "VT"), ("51", "VA"), ("53", "WA"), ("54", "WV"), ("55", "WI"),
    ("56", "WY"),
];

/// Territory codes that arrive in a non-numeric encoding.
pub const TERRITORY_CODES: &[(&str, &str)] = &[
    ("RQ", "PR"), // Puerto Rico
    ("GQ", "GU"), // Guam
];

/// National aggregates, wildcards and overseas codes with no domestic region.
pub const DROPPED_LOCATION_CODES: &[&str] = &["US", "**", "GM", "JA", "KS", "IT", "UK"];

/// Words kept lowercase by title casing unless they open the name.
pub const SMALL_WORDS: &[&str] = &[
    "of", "the", "and", "for", "in", "on", "at", "to", "a", "an", "by", "or",
];

/// Small words for comparison page titles, a wider set than [`SMALL_WORDS`].
pub const COMPARISON_SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "by", "of", "in", "is",
];

/// Hand-written narratives for the states with the largest federal footprint.
pub const STATE_NARRATIVES: &[(&str, &str)] = &[
    ("DC", "The Beltway Bubble — DC has the highest concentration of federal workers and felt DOGE cuts most directly. With over 100,000 federal employees, the district is ground zero for workforce reduction efforts."),
    ("VA", "As part of the Pentagon corridor, Virginia houses DOD, intelligence agencies, and a massive contractor workforce. DOGE-driven cuts ripple through Northern Virginia communities deeply tied to federal spending."),
    ("MD", "Maryland sits at the heart of the federal establishment, home to NIH, NSA, and dozens of agencies along the Baltimore-Washington corridor. Workforce reductions here impact both government and the surrounding economy."),
    ("CA", "Home to major military bases, VA hospitals, and federal research labs like NASA JPL, California has one of the largest federal footprints outside the Beltway."),
    ("TX", "Military installations, NASA Johnson Space Center, and border security operations make Texas a critical federal employment hub. DOGE cuts here affect national defense and immigration enforcement."),
    ("GA", "CDC headquarters in Atlanta and major military installations like Fort Liberty make Georgia a key state for federal employment in healthcare and defense."),
    ("FL", "VA healthcare facilities, military bases like MacDill AFB, and space operations at Cape Canaveral give Florida a diverse federal workforce vulnerable to DOGE restructuring."),
];

/// Head-to-head agency matchups published under `comparisons/`.
pub const AGENCY_MATCHUPS: &[(&str, &str, &str)] = &[
    ("va-vs-dod", "VA", "DD"),
    ("dhs-vs-doj", "HS", "DJ"),
    ("nasa-vs-doe", "NN", "DN"),
    ("hhs-vs-ed", "HE", "ED"),
    ("epa-vs-doi", "EP", "IN"),
    ("state-vs-usaid", "ST", "AM"),
    ("gsa-vs-opm", "GS", "OM"),
    ("usda-vs-doi", "AG", "IN"),
    ("treasury-vs-ssa", "TR", "SZ"),
    ("doj-vs-dhs", "DJ", "HS"),
    ("navy-vs-army", "NV", "AR"),
    ("army-vs-air-force", "AR", "AF"),
    ("va-vs-hhs", "VA", "HE"),
    ("ed-vs-labor", "ED", "DL"),
    ("commerce-vs-agriculture", "CM", "AG"),
    ("dot-vs-dhs", "TD", "HS"),
    ("epa-vs-energy", "EP", "DN"),
    ("nasa-vs-nsf", "NN", "NF"),
    ("hud-vs-ed", "HU", "ED"),
    ("sba-vs-gsa", "SB", "GS"),
    ("state-vs-doj", "ST", "DJ"),
    ("treasury-vs-commerce", "TR", "CM"),
    ("labor-vs-hhs", "DL", "HE"),
    ("interior-vs-agriculture", "IN", "AG"),
    ("opm-vs-omb", "OM", "BO"),
    ("sec-vs-cftc", "SE", "CT"),
    ("fdic-vs-ncua", "FD", "CU"),
    ("ftc-vs-fcc", "FT", "FC"),
    ("nrc-vs-epa", "NU", "EP"),
    ("usaid-vs-peace-corps", "AM", "PU"),
];

/// Truncated or abbreviated agency names as they appear in the source data,
/// mapped to their published form.
pub const AGENCY_NAME_FIXES: &[(&str, &str)] = &[
    ("Department of Housing and Urban Developm", "Department of Housing and Urban Development"),
    ("Department of Treasury", "Department of the Treasury"),
    ("Department of Interior", "Department of the Interior"),
    ("Department of Health and Human Serv", "Department of Health and Human Services"),
    ("Department of Veterans Affair", "Department of Veterans Affairs"),
    ("U.S.agency for Global Media", "U.S. Agency for Global Media"),
    ("U.S. Agency for International Dev", "U.S. Agency for International Development"),
    ("U.S.-China Economic & Security Rev Cmsn", "U.S.-China Economic and Security Review Commission"),
    ("U.S. Cmsn on Internatl Religious Freedom", "U.S. Commission on International Religious Freedom"),
    ("Internat Boundary Cmsn: U.S. and Canada", "International Boundary Commission: U.S. and Canada"),
    ("Inter Bound and Water Comm U.S. Section", "International Boundary and Water Commission U.S. Section"),
    ("International Joint Cmsn: U.S. & Canada", "International Joint Commission: U.S. and Canada"),
    ("Fed Mediation and Conciliation Service", "Federal Mediation and Conciliation Service"),
    ("Corp for National and Community Service", "Corporation for National and Community Service"),
    ("Court Services and Offendr Supervsn Agy", "Court Services and Offender Supervision Agency"),
    ("Council of Insp. Gen. on Integ.& Effic.", "Council of Inspectors General on Integrity and Efficiency"),
    ("Ofc of the Nat Cyber Dir", "Office of the National Cyber Director"),
    ("Adv Council on Historic Preservation", "Advisory Council on Historic Preservation"),
    ("Cmte for Purch Frm Pple Blind or Sev Dis", "Committee for Purchase From People Who Are Blind or Severely Disabled"),
    ("Nat Cmsn on Libraries and Info Science", "National Commission on Libraries and Information Science"),
    ("Nat Foundation on Arts and Humanities", "National Foundation on the Arts and Humanities"),
    ("Privacy and Civil Liberties Oversight", "Privacy and Civil Liberties Oversight Board"),
    ("Federal Permitting Improvement Steer", "Federal Permitting Improvement Steering Council"),
    ("Federal Permitting Improvement Steering", "Federal Permitting Improvement Steering Council"),
];

/// Full agency names with a well-known short form.
pub const AGENCY_ACRONYMS: &[(&str, &str)] = &[
    ("U.S. Agency for International Development", "USAID"),
    ("National Aeronautics and Space Administration", "NASA"),
    ("Environmental Protection Agency", "EPA"),
    ("General Services Administration", "GSA"),
    ("Office of Personnel Management", "OPM"),
    ("Office of Management and Budget", "OMB"),
    ("Small Business Administration", "SBA"),
    ("Social Security Administration", "SSA"),
    ("National Science Foundation", "NSF"),
    ("Securities and Exchange Commission", "SEC"),
    ("Commodity Futures Trading Commission", "CFTC"),
    ("Federal Deposit Insurance Corporation", "FDIC"),
    ("National Credit Union Administration", "NCUA"),
    ("Federal Trade Commission", "FTC"),
    ("Federal Communications Commission", "FCC"),
    ("Nuclear Regulatory Commission", "NRC"),
];
