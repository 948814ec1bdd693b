//! Parsing of pasted participant rows and agenda lines.
//!
//! Rows usually come straight out of a spreadsheet selection, so the parser is
//! forgiving: any row it cannot make sense of is dropped on its own without
//! affecting the rows around it. Only a completely empty result means
//! something, and deciding what to tell the user about it is up to the caller.

use super::model::Participant;

/// Delimiters in priority order: spreadsheet copy (tab), European CSV (`;`),
/// plain CSV (`,`). The first one present in a line wins for that line.
const DELIMITERS: [char; 3] = ['\t', ';', ','];

const CURRENCY_SYMBOLS: [char; 2] = ['€', '$'];

/// Parses `name, title, salary` rows into participants.
///
/// Extra columns after the salary are ignored. Rows with fewer than three
/// fields, or whose salary does not normalize to a positive number, are
/// skipped.
pub fn parse_participants(raw_text: &str) -> Vec<Participant> {
    let mut participants = Vec::new();

    for (line_no, line) in raw_text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let delimiter = DELIMITERS
            .iter()
            .copied()
            .find(|d| line.contains(*d))
            .unwrap_or(',');

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if fields.len() < 3 {
            tracing::debug!(line = line_no + 1, fields = fields.len(), "skipping short participant row");
            continue;
        }

        let Some(salary) = normalize_salary(fields[2]) else {
            tracing::debug!(line = line_no + 1, salary = fields[2], "skipping row with unusable salary");
            continue;
        };

        participants.push(Participant::new(fields[0], fields[1], salary));
    }

    participants
}

/// Turns a free-form salary cell into a positive number.
///
/// Whitespace (no-break spaces included) and currency symbols are removed
/// first. Separators are then resolved:
///
/// - both `,` and `.` present: the last one is the decimal separator, the
///   other is grouping (`"$1,234.56"` → 1234.56, `"1.234,56"` → 1234.56)
/// - only `,`: a single comma followed by exactly three digits, or several
///   commas, are grouping (`"120,000"` → 120000); otherwise it is a decimal
///   comma (`"50000,00"` → 50000.0)
/// - only `.`: several dots are grouping (`"1.234.567"`); a single dot is a
///   decimal point
///
/// Anything that is neither a digit nor the decimal point is stripped last.
pub fn normalize_salary(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let canonical = resolve_separators(&compact);

    let digits: String = canonical
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits
        .parse::<f64>()
        .ok()
        .filter(|salary| salary.is_finite() && *salary > 0.0)
}

fn resolve_separators(compact: &str) -> String {
    let last_comma = compact.rfind(',');
    let last_dot = compact.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if dot > comma => compact.replace(',', ""),
        (Some(_), Some(_)) => compact.replace('.', "").replace(',', "."),
        (Some(comma), None) => {
            let commas = compact.matches(',').count();
            let digits_after = compact[comma + 1..]
                .chars()
                .take_while(char::is_ascii_digit)
                .count();
            if commas > 1 || digits_after == 3 {
                compact.replace(',', "")
            } else {
                compact.replace(',', ".")
            }
        }
        (None, Some(_)) if compact.matches('.').count() > 1 => compact.replace('.', ""),
        _ => compact.to_string(),
    }
}

/// Splits an agenda block into topic titles, one per non-empty line.
pub fn parse_agenda(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
