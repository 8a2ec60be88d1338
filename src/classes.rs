//! The static class catalog and the helpers that turn class codes into
//! labels.

use std::collections::HashSet;

/// One catalog entry: canonical code (`"CS142"`) and full display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub code: &'static str,
    pub name: &'static str,
}

impl ClassInfo {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

/// Every class a profile or herd may reference, grouped by department.
pub const CATALOG: &[ClassInfo] = &[
    ClassInfo::new("ACC200", "ACC 200 - Principles of Accounting"),
    ClassInfo::new("ACC201", "ACC 201 - Intro to Financial Accounting"),
    ClassInfo::new("ACC310", "ACC 310 - Intermediate Financial Accounting I"),
    ClassInfo::new("ACC410", "ACC 410 - Intermediate Financial Accounting II"),
    ClassInfo::new("BIO100", "BIO 100 - Principles of Biology"),
    ClassInfo::new("BIO130", "BIO 130 - Intro to Human Anatomy"),
    ClassInfo::new("BIO220", "BIO 220 - Principles of Cell Biology"),
    ClassInfo::new("BIO350", "BIO 350 - Genetics"),
    ClassInfo::new("BIO420", "BIO 420 - Molecular Biology"),
    ClassInfo::new("BUS100", "BUS M 100 - Intro to Business Management"),
    ClassInfo::new("BUS201", "BUS M 201 - Principles of Management"),
    ClassInfo::new("BUS301", "BUS M 301 - Organizational Behavior"),
    ClassInfo::new("BUS340", "BUS M 340 - Business Finance"),
    ClassInfo::new("CHEM105", "CHEM 105 - General College Chemistry I"),
    ClassInfo::new("CHEM106", "CHEM 106 - General College Chemistry II"),
    ClassInfo::new("CHEM221", "CHEM 221 - Organic Chemistry I"),
    ClassInfo::new("CHEM222", "CHEM 222 - Organic Chemistry II"),
    ClassInfo::new("CHEM351", "CHEM 351 - Biochemistry"),
    ClassInfo::new("COMMS101", "COMMS 101 - Intro to Communications"),
    ClassInfo::new("COMMS210", "COMMS 210 - Media Literacy"),
    ClassInfo::new("COMMS320", "COMMS 320 - Public Relations"),
    ClassInfo::new("CS111", "CS 111 - Intro to Computer Science"),
    ClassInfo::new("CS142", "CS 142 - Intro to Computer Programming"),
    ClassInfo::new("CS235", "CS 235 - Data Structures"),
    ClassInfo::new("CS240", "CS 240 - Advanced Software Construction"),
    ClassInfo::new("CS312", "CS 312 - Algorithm Design & Analysis"),
    ClassInfo::new("CS340", "CS 340 - Software Design"),
    ClassInfo::new("ECON110", "ECON 110 - Economic Principles and Problems"),
    ClassInfo::new("ECON230", "ECON 230 - Principles of Microeconomics"),
    ClassInfo::new("ECON231", "ECON 231 - Principles of Macroeconomics"),
    ClassInfo::new("ECON380", "ECON 380 - Intermediate Microeconomics"),
    ClassInfo::new("ECON381", "ECON 381 - Intermediate Macroeconomics"),
    ClassInfo::new("ENG150", "ENGL 150 - Intro to Literary Analysis"),
    ClassInfo::new("ENG210", "ENGL 210 - English Language"),
    ClassInfo::new("ENG251", "ENGL 251 - American Literary History I"),
    ClassInfo::new("ENG292", "ENGL 292 - World Literature"),
    ClassInfo::new("ENG316", "ENGL 316 - Technical Communication"),
    ClassInfo::new("EXSC305", "EXSC 305 - Physiology of Exercise"),
    ClassInfo::new("EXSC410", "EXSC 410 - Biomechanics"),
    ClassInfo::new("HIST200", "HIST 200 - Intro to Historical Methods"),
    ClassInfo::new("HIST201", "HIST 201 - US History to 1877"),
    ClassInfo::new("HIST202", "HIST 202 - US History Since 1877"),
    ClassInfo::new("HIST310", "HIST 310 - European History"),
    ClassInfo::new("IS201", "IS 201 - Intro to Management Information Systems"),
    ClassInfo::new("IS303", "IS 303 - Database Design"),
    ClassInfo::new("IS401", "IS 401 - Enterprise Architecture"),
    ClassInfo::new("MKTG201", "MKTG 201 - Principles of Marketing"),
    ClassInfo::new("MKTG301", "MKTG 301 - Consumer Behavior"),
    ClassInfo::new("MKTG380", "MKTG 380 - Marketing Research"),
    ClassInfo::new("MKTG410", "MKTG 410 - Digital Marketing"),
    ClassInfo::new("MATH110", "MATH 110 - College Algebra"),
    ClassInfo::new("MATH112", "MATH 112 - Calculus I"),
    ClassInfo::new("MATH113", "MATH 113 - Calculus II"),
    ClassInfo::new("MATH213", "MATH 213 - Calculus III"),
    ClassInfo::new("MATH215", "MATH 215 - Linear Algebra"),
    ClassInfo::new("MATH313", "MATH 313 - Intro to Real Analysis"),
    ClassInfo::new("MUSIC101", "MUSIC 101 - Intro to Music"),
    ClassInfo::new("MUSIC160", "MUSIC 160 - Music Theory I"),
    ClassInfo::new("MUSIC260", "MUSIC 260 - Music Theory II"),
    ClassInfo::new("NURS200", "NURS 200 - Intro to Nursing"),
    ClassInfo::new("NURS310", "NURS 310 - Health Assessment"),
    ClassInfo::new("NURS350", "NURS 350 - Pathophysiology"),
    ClassInfo::new("PHIL110", "PHIL 110 - Intro to Philosophy"),
    ClassInfo::new("PHIL201", "PHIL 201 - History of Philosophy"),
    ClassInfo::new("PHIL305", "PHIL 305 - Ethics"),
    ClassInfo::new("PHYS105", "PHYS 105 - General Physics I"),
    ClassInfo::new("PHYS106", "PHYS 106 - General Physics II"),
    ClassInfo::new("PHYS121", "PHYS 121 - Intro to Newtonian Mechanics"),
    ClassInfo::new("PHYS220", "PHYS 220 - Intro to Modern Physics"),
    ClassInfo::new("POLI110", "POLI 110 - American Heritage"),
    ClassInfo::new("POLI200", "POLI 200 - Intro to Political Science"),
    ClassInfo::new("POLI310", "POLI 310 - International Relations"),
    ClassInfo::new("PSYCH111", "PSYCH 111 - General Psychology"),
    ClassInfo::new("PSYCH307", "PSYCH 307 - Developmental Psychology"),
    ClassInfo::new("PSYCH310", "PSYCH 310 - Abnormal Psychology"),
    ClassInfo::new("PSYCH340", "PSYCH 340 - Social Psychology"),
    ClassInfo::new("PSYCH381", "PSYCH 381 - Research Methods"),
    ClassInfo::new("REL121", "REL A 121 - Book of Mormon I"),
    ClassInfo::new("REL122", "REL A 122 - Book of Mormon II"),
    ClassInfo::new("REL211", "REL A 211 - New Testament I"),
    ClassInfo::new("REL275", "REL A 275 - Teachings of the Living Prophets"),
    ClassInfo::new("REL324", "REL C 324 - Doctrine & Covenants I"),
    ClassInfo::new("SOC111", "SOC 111 - Intro to Sociology"),
    ClassInfo::new("SOC301", "SOC 301 - Social Research Methods"),
    ClassInfo::new("SOC310", "SOC 310 - Sociology of the Family"),
    ClassInfo::new("STAT121", "STAT 121 - Principles of Statistics"),
    ClassInfo::new("STAT230", "STAT 230 - Applied Regression Analysis"),
    ClassInfo::new("STAT340", "STAT 340 - Probability & Statistics"),
    ClassInfo::new("WRTG150", "WRTG 150 - Writing and Rhetoric"),
    ClassInfo::new("WRTG316", "WRTG 316 - Technical Communication"),
];

pub fn find(code: &str) -> Option<&'static ClassInfo> {
    CATALOG.iter().find(|c| c.code == code)
}

pub fn is_known(code: &str) -> bool {
    find(code).is_some()
}

/// Inserts a space between the department letters and the course number:
/// `"CS142"` → `"CS 142"`. Codes not shaped as uppercase letters followed by
/// digits are returned unchanged.
pub fn format_label(code: &str) -> String {
    let split = code
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(code.len());
    let (letters, digits) = code.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return code.to_string();
    }
    format!("{} {}", letters, digits)
}

/// Full catalog name for `code`, or its formatted label if it is not in the
/// catalog.
pub fn display_name(code: &str) -> String {
    match find(code) {
        Some(info) => info.name.to_string(),
        None => format_label(code),
    }
}

/// Classes present in both lists, in the order they appear in `theirs`,
/// without repeats.
pub fn shared_classes(mine: &[String], theirs: &[String]) -> Vec<String> {
    let mine: HashSet<&str> = mine.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    theirs
        .iter()
        .filter(|code| mine.contains(code.as_str()) && seen.insert(code.as_str()))
        .cloned()
        .collect()
}

/// Catalog entries whose code or name contains `query`, ignoring case. An
/// empty query returns the whole catalog.
pub fn search_catalog(query: &str) -> Vec<&'static ClassInfo> {
    let lower = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&lower) || c.code.to_lowercase().contains(&lower))
        .collect()
}
