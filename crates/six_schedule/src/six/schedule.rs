//! Extraction of class schedules from the SIX `kelas/jadwal/kuliah` page.

use super::text::normalize;
use super::types::{CourseClass, ScheduleSlot};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

// Column positions in the schedule table. SIX changes its layout now and then;
// keep every index here.
const COL_CODE: usize = 2;
const COL_NAME: usize = 3;
const COL_CREDIT_UNITS: usize = 4;
const COL_CLASS_NUMBER: usize = 5;
const COL_QUOTA: usize = 6;
const COL_LECTURERS: usize = 7;
const COL_NOTES: usize = 8;
const COL_SLOTS: usize = 9;
const MIN_CELLS: usize = 10;

// Part positions in a slot line: `day / date / time / room / activity / method`.
const PART_DAY: usize = 0;
const PART_TIME: usize = 2;
const PART_ROOM: usize = 3;
const PART_ACTIVITY: usize = 4;
const PART_METHOD: usize = 5;
const MIN_SLOT_PARTS: usize = 6;

/// Link text SIX appends to long slot lists; not a schedule line.
const SHOW_ALL_MARKER: &str = "Tampilkan semua";

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.table tbody tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());
static LECTURER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul li").unwrap());
static SLOT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

/// Parses every class row out of a schedule page.
///
/// Malformed rows and slot lines are skipped rather than failing the page.
pub fn extract_classes(document: &Html) -> Vec<CourseClass> {
    document
        .select(&ROW_SELECTOR)
        .filter_map(|row| parse_class_row(&row))
        .collect()
}

/// Parses a single table row, or `None` if it is not a class row.
fn parse_class_row(row: &ElementRef) -> Option<CourseClass> {
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < MIN_CELLS {
        return None;
    }

    let code = cell_text(&cells[COL_CODE]);
    if code.is_empty() {
        return None;
    }

    Some(CourseClass {
        code,
        name: cell_text(&cells[COL_NAME]),
        credit_units: parse_int(&cells[COL_CREDIT_UNITS]),
        class_number: cell_text(&cells[COL_CLASS_NUMBER]),
        quota: parse_int(&cells[COL_QUOTA]),
        lecturers: parse_lecturers(&cells[COL_LECTURERS]),
        notes: cell_text(&cells[COL_NOTES]),
        slots: parse_slots(&cells[COL_SLOTS]),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    normalize(&cell.text().collect::<String>())
}

/// Unparseable numbers become 0; SIX leaves these blank for some classes.
fn parse_int(cell: &ElementRef) -> i64 {
    cell_text(cell).parse().unwrap_or(0)
}

/// Extracts lecturer names from the nested list in a cell.
pub fn parse_lecturers(cell: &ElementRef) -> Vec<String> {
    cell.select(&LECTURER_SELECTOR)
        .map(|li| normalize(&li.text().collect::<String>()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Extracts distinct weekly slots from the nested list in a cell.
///
/// SIX lists one line per meeting date, so a weekly class shows up once per
/// week. Lines that match on everything but the date collapse into one slot.
pub fn parse_slots(cell: &ElementRef) -> Vec<ScheduleSlot> {
    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for li in cell.select(&SLOT_SELECTOR) {
        let text = normalize(&li.text().collect::<String>());
        let Some(slot) = parse_slot_line(&text) else {
            continue;
        };

        if seen.insert(slot.clone()) {
            slots.push(slot);
        }
    }

    slots
}

/// Parses one `day / date / time / room / activity / method` line.
fn parse_slot_line(text: &str) -> Option<ScheduleSlot> {
    if text.is_empty() || text.contains(SHOW_ALL_MARKER) {
        return None;
    }

    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    if parts.len() < MIN_SLOT_PARTS {
        return None;
    }

    Some(ScheduleSlot {
        day: parts[PART_DAY].to_string(),
        time: parts[PART_TIME].to_string(),
        room: parts[PART_ROOM].to_string(),
        activity: parts[PART_ACTIVITY].to_string(),
        method: parts[PART_METHOD].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROW_SCHEDULE: &str = r#"<html><body>
<table class="table"><tbody>
<tr>
    <td>1</td>
    <td>check</td>
    <td>FI1210</td>
    <td>Fisika Dasar</td>
    <td>3</td>
    <td>01</td>
    <td>45</td>
    <td><ul><li>Dosen A</li><li>Dosen B</li></ul></td>
    <td>
        Catatan
        penting
    </td>
    <td>
        <ul>
            <li>Senin / 2024-01-06 / 07:00-09:00 / 7602 / Kuliah / Offline</li>
            <li>Rabu / 2024-01-08 / 13:00-15:00 / 7603 / Kuliah / Online</li>
        </ul>
    </td>
</tr>
<tr>
    <td>2</td>
    <td>check</td>
    <td>FI1220</td>
    <td>Fisika Lanjut</td>
    <td>3</td>
    <td>02</td>
    <td>40</td>
    <td><ul><li>Dosen C</li></ul></td>
    <td></td>
    <td>
        <ul>
            <li>Selasa / 2024-01-07 / 09:00-11:00 / 7604 / Kuliah / Offline</li>
        </ul>
    </td>
</tr>
</tbody></table>
</body></html>"#;

    fn first_element<'a>(document: &'a Html, selector: &str) -> ElementRef<'a> {
        let selector = Selector::parse(selector).unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_extract_two_rows() {
        let document = Html::parse_document(TWO_ROW_SCHEDULE);
        let classes = extract_classes(&document);

        assert_eq!(classes.len(), 2);

        let first = &classes[0];
        assert_eq!(first.code, "FI1210");
        assert_eq!(first.name, "Fisika Dasar");
        assert_eq!(first.credit_units, 3);
        assert_eq!(first.class_number, "01");
        assert_eq!(first.quota, 45);
        assert_eq!(first.lecturers, vec!["Dosen A", "Dosen B"]);
        assert_eq!(first.notes, "Catatan penting");
        assert_eq!(first.slots.len(), 2);
        assert_eq!(
            first.slots[0],
            ScheduleSlot {
                day: "Senin".to_string(),
                time: "07:00-09:00".to_string(),
                room: "7602".to_string(),
                activity: "Kuliah".to_string(),
                method: "Offline".to_string(),
            }
        );
        assert_eq!(first.slots[1].method, "Online");

        let second = &classes[1];
        assert_eq!(second.code, "FI1220");
        assert_eq!(second.lecturers.len(), 1);
        assert_eq!(second.notes, "");
        assert_eq!(second.slots.len(), 1);
    }

    #[test]
    fn test_skips_rows_with_few_cells() {
        let html = r#"<table class="table"><tbody>
            <tr><td>only</td><td>two</td></tr>
        </tbody></table>"#;
        let classes = extract_classes(&Html::parse_document(html));
        assert!(classes.is_empty());
    }

    #[test]
    fn test_skips_empty_code() {
        let html = r#"<table class="table"><tbody>
        <tr>
            <td>1</td><td>x</td><td>  </td><td>Name</td><td>3</td>
            <td>01</td><td>40</td><td><ul><li>Dosen</li></ul></td><td>note</td>
            <td><ul><li>Senin / d / 07:00 / R / Kuliah / Offline</li></ul></td>
        </tr>
        </tbody></table>"#;
        let classes = extract_classes(&Html::parse_document(html));
        assert!(classes.is_empty());
    }

    #[test]
    fn test_bad_numbers_become_zero() {
        let html = r#"<table class="table"><tbody>
        <tr>
            <td>1</td><td>x</td><td>IF2110</td><td>Algoritma</td><td>tiga</td>
            <td>01</td><td>-</td><td><ul></ul></td><td></td><td><ul></ul></td>
        </tr>
        </tbody></table>"#;
        let classes = extract_classes(&Html::parse_document(html));

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].credit_units, 0);
        assert_eq!(classes[0].quota, 0);
        assert!(classes[0].lecturers.is_empty());
        assert!(classes[0].slots.is_empty());
    }

    #[test]
    fn test_bad_row_does_not_abort_others() {
        let html = r#"<table class="table"><tbody>
        <tr><td>broken</td></tr>
        <tr>
            <td>1</td><td>x</td><td>MA1101</td><td>Matematika</td><td>4</td>
            <td>03</td><td>60</td><td><ul><li>Dosen D</li></ul></td><td></td><td><ul></ul></td>
        </tr>
        </tbody></table>"#;
        let classes = extract_classes(&Html::parse_document(html));

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].code, "MA1101");
    }

    #[test]
    fn test_slot_deduplication_ignores_date() {
        let document = Html::parse_document(
            r#"<ul>
            <li>Senin / 2024-01-06 / 07:00-09:00 / 7602 / Kuliah / Offline</li>
            <li>Rabu / 2024-01-08 / 13:00-15:00 / 7603 / Kuliah / Offline</li>
            <li>Senin / 2024-01-13 / 07:00-09:00 / 7602 / Kuliah / Offline</li>
        </ul>"#,
        );
        let slots = parse_slots(&first_element(&document, "ul"));

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].day, "Senin");
        assert_eq!(slots[1].day, "Rabu");
    }

    #[test]
    fn test_slot_skips_show_all_marker() {
        let document = Html::parse_document(
            r#"<ul>
            <li>Senin / 2024-01-06 / 07:00-09:00 / 7602 / Kuliah / Offline</li>
            <li>Tampilkan semua jadwal</li>
        </ul>"#,
        );
        let slots = parse_slots(&first_element(&document, "ul"));
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_slot_skips_short_lines() {
        let document = Html::parse_document(
            r#"<ul>
            <li>invalid text without slashes</li>
            <li>only/three/parts</li>
            <li>a / b / c / d / e</li>
            <li>   </li>
        </ul>"#,
        );
        let slots = parse_slots(&first_element(&document, "ul"));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_slot_line_with_extra_whitespace() {
        let slot = parse_slot_line("Kamis /\n 2024-01-09 /  10:00-12:00 / Labdas 2 / Praktikum / Hybrid / extra")
            .unwrap();
        assert_eq!(slot.day, "Kamis");
        assert_eq!(slot.time, "10:00-12:00");
        assert_eq!(slot.room, "Labdas 2");
        assert_eq!(slot.activity, "Praktikum");
        assert_eq!(slot.method, "Hybrid");
    }

    #[test]
    fn test_lecturers_skip_empty_items() {
        let document =
            Html::parse_document(r#"<div><ul><li> Dosen  A </li><li>  </li><li>Dosen B</li></ul></div>"#);
        let lecturers = parse_lecturers(&first_element(&document, "div"));
        assert_eq!(lecturers, vec!["Dosen A", "Dosen B"]);
    }

    #[test]
    fn test_lecturers_empty_list() {
        let document = Html::parse_document(r#"<div><ul></ul></div>"#);
        assert!(parse_lecturers(&first_element(&document, "div")).is_empty());
    }
}
