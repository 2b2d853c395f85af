//! Serialize a draw log to PDF bytes

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::canvas::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::draw::{DrawLog, DrawOp, Point, Rect};
use crate::error::DossierError;
use crate::metrics;
use crate::style::{Align, FontFace, Rgb};

/// Points per millimetre
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Bezier control distance for quarter-circle arcs
const KAPPA: f32 = 0.552_284_8;

/// Render every page of `log` into a single PDF document.
pub fn render_pdf(log: &DrawLog) -> Result<Vec<u8>, DossierError> {
    render_document(log, None)
}

/// Same as [`render_pdf`], recording `title` in the document info dictionary.
pub fn render_pdf_with_title(log: &DrawLog, title: &str) -> Result<Vec<u8>, DossierError> {
    render_document(log, Some(title))
}

fn render_document(log: &DrawLog, title: Option<&str>) -> Result<Vec<u8>, DossierError> {
    if log.page_count() == 0 {
        return Err(DossierError::Render("Document has no pages".to_string()));
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => Object::Dictionary(fonts),
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in 1..=log.page_count() {
        let operations = log
            .operations_for_page(page)
            .into_iter()
            .flat_map(page_operations)
            .collect::<Vec<_>>();
        debug!("Page {}: {} content operations", page, operations.len());

        let encoded = Content { operations }
            .encode()
            .map_err(|e| DossierError::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH * PT_PER_MM),
                Object::Real(PAGE_HEIGHT * PT_PER_MM),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(log.page_count() as i64),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = add_info(&mut doc, title);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| DossierError::Render(e.to_string()))?;

    Ok(output)
}

fn add_info(doc: &mut Document, title: Option<&str>) -> ObjectId {
    let mut info = dictionary! {
        "Producer" => Object::string_literal(concat!("dossier-core ", env!("CARGO_PKG_VERSION"))),
    };
    if let Some(title) = title {
        info.set(
            "Title",
            Object::String(encode_win_ansi(title), StringFormat::Literal),
        );
    }
    doc.add_object(info)
}

fn page_operations(op: &DrawOp) -> Vec<Operation> {
    let mut ops = vec![Operation::new("q", vec![])];

    match op {
        DrawOp::FillRect { rect, color, .. } => {
            ops.push(fill_color(*color));
            let (x, y) = to_pdf(Point::new(rect.x, rect.bottom()));
            ops.push(Operation::new(
                "re",
                reals(&[x, y, rect.width * PT_PER_MM, rect.height * PT_PER_MM]),
            ));
            ops.push(Operation::new("f", vec![]));
        }
        DrawOp::FillRoundedRect {
            rect,
            radius,
            color,
            ..
        } => {
            ops.push(fill_color(*color));
            ops.extend(rounded_rect_path(rect, *radius));
            ops.push(Operation::new("f", vec![]));
        }
        DrawOp::Line {
            from,
            to,
            color,
            width,
            ..
        } => {
            ops.push(stroke_color(*color));
            ops.push(Operation::new("w", reals(&[width * PT_PER_MM])));
            let (x1, y1) = to_pdf(*from);
            let (x2, y2) = to_pdf(*to);
            ops.push(Operation::new("m", reals(&[x1, y1])));
            ops.push(Operation::new("l", reals(&[x2, y2])));
            ops.push(Operation::new("S", vec![]));
        }
        DrawOp::Curve {
            from,
            ctrl1,
            ctrl2,
            to,
            color,
            width,
            ..
        } => {
            ops.push(stroke_color(*color));
            ops.push(Operation::new("w", reals(&[width * PT_PER_MM])));
            let (x0, y0) = to_pdf(*from);
            let (x1, y1) = to_pdf(*ctrl1);
            let (x2, y2) = to_pdf(*ctrl2);
            let (x3, y3) = to_pdf(*to);
            ops.push(Operation::new("m", reals(&[x0, y0])));
            ops.push(Operation::new("c", reals(&[x1, y1, x2, y2, x3, y3])));
            ops.push(Operation::new("S", vec![]));
        }
        DrawOp::FillCircle {
            center,
            radius,
            color,
            ..
        } => {
            ops.push(fill_color(*color));
            ops.extend(circle_path(*center, *radius));
            ops.push(Operation::new("f", vec![]));
        }
        DrawOp::Text {
            origin,
            text,
            style,
            align,
            ..
        } => {
            let x = match align {
                Align::Left => origin.x,
                Align::Right => origin.x - metrics::text_width(text, style.face, style.size),
            };
            let (x, y) = to_pdf(Point::new(x, origin.y));
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(style.face.resource_name().as_bytes().to_vec()),
                    Object::Real(style.size),
                ],
            ));
            ops.push(fill_color(style.color));
            ops.push(Operation::new("Td", reals(&[x, y])));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
    }

    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Top-left millimetres to bottom-left points
fn to_pdf(p: Point) -> (f32, f32) {
    (p.x * PT_PER_MM, (PAGE_HEIGHT - p.y) * PT_PER_MM)
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v)).collect()
}

fn fill_color(color: Rgb) -> Operation {
    let (r, g, b) = color.to_unit();
    Operation::new("rg", reals(&[r, g, b]))
}

fn stroke_color(color: Rgb) -> Operation {
    let (r, g, b) = color.to_unit();
    Operation::new("RG", reals(&[r, g, b]))
}

fn rounded_rect_path(rect: &Rect, radius: f32) -> Vec<Operation> {
    let left = rect.x * PT_PER_MM;
    let right = (rect.x + rect.width) * PT_PER_MM;
    let top = (PAGE_HEIGHT - rect.y) * PT_PER_MM;
    let bottom = (PAGE_HEIGHT - rect.bottom()) * PT_PER_MM;
    let r = (radius * PT_PER_MM)
        .min((right - left) / 2.0)
        .min((top - bottom) / 2.0)
        .max(0.0);
    let k = KAPPA * r;

    vec![
        Operation::new("m", reals(&[left + r, bottom])),
        Operation::new("l", reals(&[right - r, bottom])),
        Operation::new(
            "c",
            reals(&[right - r + k, bottom, right, bottom + r - k, right, bottom + r]),
        ),
        Operation::new("l", reals(&[right, top - r])),
        Operation::new(
            "c",
            reals(&[right, top - r + k, right - r + k, top, right - r, top]),
        ),
        Operation::new("l", reals(&[left + r, top])),
        Operation::new(
            "c",
            reals(&[left + r - k, top, left, top - r + k, left, top - r]),
        ),
        Operation::new("l", reals(&[left, bottom + r])),
        Operation::new(
            "c",
            reals(&[left, bottom + r - k, left + r - k, bottom, left + r, bottom]),
        ),
        Operation::new("h", vec![]),
    ]
}

fn circle_path(center: Point, radius: f32) -> Vec<Operation> {
    let (cx, cy) = to_pdf(center);
    let r = radius * PT_PER_MM;
    let k = KAPPA * r;

    vec![
        Operation::new("m", reals(&[cx + r, cy])),
        Operation::new("c", reals(&[cx + r, cy + k, cx + k, cy + r, cx, cy + r])),
        Operation::new("c", reals(&[cx - k, cy + r, cx - r, cy + k, cx - r, cy])),
        Operation::new("c", reals(&[cx - r, cy - k, cx - k, cy - r, cx, cy - r])),
        Operation::new("c", reals(&[cx + k, cy - r, cx + r, cy - k, cx + r, cy])),
        Operation::new("h", vec![]),
    ]
}

/// Encode text for the WinAnsi-encoded standard fonts; unmappable
/// characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}
