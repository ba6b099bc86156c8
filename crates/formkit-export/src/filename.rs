/// File name for a CSV download: `{slug}_responses_{YYYY-MM-DD}.csv`.
///
/// The slug lower-cases the title and turns every run of characters other
/// than ASCII letters and digits into a single `_`.
pub fn export_filename(title: &str, date: jiff::civil::Date) -> String {
    format!("{}_responses_{date}.csv", slug(title))
}

pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            out.push('_');
            in_gap = true;
        }
    }
    out
}
