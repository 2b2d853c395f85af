//! Three-page dossier layout
//!
//! Every page gets the shared chrome (background, header band with logo and
//! page title, footer signature) before its own content. Vertical placement of
//! flowing blocks goes through a [`Cursor`]; fixed bands such as the header,
//! footer and founder callout stay anchored to the page edges.

use dossier_types::PropertyRecord;
use tracing::{debug, instrument};

use crate::canvas::{Canvas, Cursor, PAGE_HEIGHT, PAGE_WIDTH};
use crate::config::{DossierConfig, TIER_COUNT};
use crate::draw::{DrawLog, Point, Rect};
use crate::error::DossierError;
use crate::metrics;
use crate::pricing::{pricing_tiers, MATRIX_HEADER};
use crate::request::DossierRequest;
use crate::style::{palette, TextStyle};
use crate::valuation::{resolve_fair_value, valuation_lines};

pub const PAGE_TITLES: [&str; 3] = [
    "Asset Intel Report",
    "Project Specification",
    "Compliance & Valuation",
];

pub const COMMUTE_HEADING: &str = "PATHFINDER: COMMUTE AUDIT";

const MARGIN: f32 = 15.0;
const HEADER_HEIGHT: f32 = 25.0;
const CONTENT_TOP: f32 = 45.0;
/// Top edge of the founder callout, measured from the page bottom
const FOUNDER_OFFSET: f32 = 65.0;
const FOUNDER_HEIGHT: f32 = 35.0;
const FOUNDER_BODY_LINES: usize = 3;

const TITLE_MAX_LINES: usize = 3;
/// Clear space kept between page-2 content and the founder callout
const PANEL_CLEARANCE: f32 = 1.0;
const DESCRIPTION_GAP: f32 = 6.0;
const SPEC_TILE_COUNT: usize = 6;

const TILE_WIDTH: f32 = 90.0;
const TILE_HEIGHT: f32 = 18.0;
const TILE_PITCH_X: f32 = 95.0;
const TILE_PITCH_Y: f32 = 22.0;

const MATRIX_HEADING_GAP: f32 = 8.0;
const MATRIX_FIRST_ROW: f32 = 12.0;
const MATRIX_ROW_PITCH: f32 = 12.0;
/// Row band spans from this far above the baseline
const MATRIX_BAND_RISE: f32 = 8.0;
const MATRIX_BAND_HEIGHT: f32 = 11.0;
const MATRIX_COLUMNS: [f32; 3] = [20.0, 85.0, 145.0];

const VALUATION_LINE_PITCH: f32 = 11.0;
const STEP_PITCH: f32 = 8.0;

/// Logo strokes in a 100x100 box: start, two control points, end
const LOGO_STROKES: [[(f32, f32); 4]; 3] = [
    [(30.0, 20.0), (45.0, 55.0), (45.0, 55.0), (35.0, 85.0)],
    [(40.0, 30.0), (75.0, 10.0), (90.0, 55.0), (45.0, 60.0)],
    [(20.0, 70.0), (55.0, 55.0), (55.0, 55.0), (85.0, 80.0)],
];

const COVER_AUDIT: &str = "This asset has been audited for structural compliance and investment \
    viability. My team has verified the RERA documentation and current infrastructure delta to \
    ensure your capital security.";

const VALUATION_AUDIT: &str = "Our valuation model accounts for 'Real Value' vs 'Asking Price'. \
    If the Fair-Valuation is higher than asking, it's a strategic acquisition. Compliances under \
    RERA are strictly monitored.";

/// Lay out the three dossier pages.
///
/// Validates the viewer and configuration first; nothing is recorded for an
/// invalid request.
#[instrument(skip_all, fields(property = %request.property.id))]
pub fn compose(request: &DossierRequest, config: &DossierConfig) -> Result<DrawLog, DossierError> {
    request.viewer.validate()?;
    config.validate()?;

    let mut composer = Composer {
        canvas: Canvas::new(),
        config,
    };
    composer.cover_page(request)?;
    composer.specification_page(&request.property)?;
    composer.valuation_page(request)?;

    let log = composer.canvas.finish();
    debug!(
        "Composed {} pages with {} operations",
        log.page_count(),
        log.operations().len()
    );
    Ok(log)
}

struct Composer<'a> {
    canvas: Canvas,
    config: &'a DossierConfig,
}

impl Composer<'_> {
    fn new_page(&mut self, title: &str) -> Result<(), DossierError> {
        let page = self.canvas.add_page();
        let config = self.config;
        let brand = &config.brand;

        self.canvas.fill_rect(
            Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT),
            palette::SLATE_950,
        )?;
        self.canvas.fill_rect(
            Rect::new(0.0, 0.0, PAGE_WIDTH, HEADER_HEIGHT),
            palette::SLATE_900,
        )?;
        self.canvas.line(
            Point::new(0.0, HEADER_HEIGHT),
            Point::new(PAGE_WIDTH, HEADER_HEIGHT),
            palette::VIOLET_600,
            0.5,
        )?;

        self.logo(12.0, 7.0, 10.0)?;

        self.canvas
            .text(25.0, 14.0, &brand.name, TextStyle::bold(10.0, palette::WHITE))?;
        self.canvas.text(
            25.0,
            18.0,
            &brand.unit_label,
            TextStyle::bold(6.0, palette::ORANGE_300),
        )?;
        self.canvas.text_right(
            PAGE_WIDTH - MARGIN,
            15.0,
            &title.to_uppercase(),
            TextStyle::bold(10.0, palette::WHITE),
        )?;

        let footer = TextStyle::bold(8.0, palette::TEXT_GRAY);
        let footer_y = PAGE_HEIGHT - 10.0;
        let signature = metrics::fit_text(
            &metrics::normalize(&brand.signature()),
            footer.face,
            footer.size,
            PAGE_WIDTH - 2.0 * MARGIN - 25.0,
        );
        self.canvas.text(MARGIN, footer_y, &signature, footer)?;
        self.canvas
            .text(PAGE_WIDTH - 25.0, footer_y, &format!("PAGE {}", page), footer)
    }

    fn logo(&mut self, x: f32, y: f32, size: f32) -> Result<(), DossierError> {
        let scale = size / 100.0;
        self.canvas.fill_rounded_rect(
            Rect::new(x - 2.0, y - 2.0, size + 4.0, size + 4.0),
            1.5,
            palette::SLATE_800,
        )?;
        for stroke in LOGO_STROKES {
            let points = stroke.map(|(px, py)| Point::new(x + px * scale, y + py * scale));
            self.canvas.curve(points, palette::ORANGE_300, 0.6)?;
        }
        Ok(())
    }

    /// Founder callout anchored above the footer
    fn founder_view(&mut self, body: &str) -> Result<(), DossierError> {
        let config = self.config;
        let brand = &config.brand;
        let top = PAGE_HEIGHT - FOUNDER_OFFSET;
        let inner_x = MARGIN + 7.0;

        self.canvas.fill_rounded_rect(
            Rect::new(MARGIN, top, PAGE_WIDTH - 2.0 * MARGIN, FOUNDER_HEIGHT),
            3.0,
            palette::SLATE_900,
        )?;
        self.canvas.line(
            Point::new(MARGIN, top),
            Point::new(MARGIN, top + FOUNDER_HEIGHT),
            palette::LIME_400,
            0.3,
        )?;
        self.canvas.text(
            inner_x,
            top + 10.0,
            &brand.founder_attribution,
            TextStyle::bold(8.0, palette::LIME_400),
        )?;

        let body_style = TextStyle::italic(9.0, palette::WHITE);
        let width = PAGE_WIDTH - 50.0;
        let lines = metrics::clamp_lines(
            self.canvas.wrap(body, body_style, width),
            FOUNDER_BODY_LINES,
            body_style.face,
            body_style.size,
            width,
        );
        self.canvas
            .text_lines(inner_x, top + 18.0, &lines, body_style)?;

        self.canvas.text(
            inner_x,
            top + 30.0,
            &brand.compliance_status,
            TextStyle::bold(7.0, palette::TEXT_GRAY),
        )
    }

    fn cover_page(&mut self, request: &DossierRequest) -> Result<(), DossierError> {
        self.new_page(PAGE_TITLES[0])?;
        let property = &request.property;
        let text_x = 25.0;
        let text_width = PAGE_WIDTH - 50.0;

        self.canvas.fill_rect(
            Rect::new(MARGIN, CONTENT_TOP, 4.0, 45.0),
            palette::VIOLET_600,
        )?;

        let mut cursor = Cursor::at(65.0);
        let title_style = TextStyle::bold(38.0, palette::WHITE);
        let title = metrics::clamp_lines(
            self.canvas
                .wrap(&property.title.to_uppercase(), title_style, text_width),
            TITLE_MAX_LINES,
            title_style.face,
            title_style.size,
            text_width,
        );
        let consumed = self
            .canvas
            .text_lines(text_x, cursor.y(), &title, title_style)?;
        cursor.advance(consumed);

        // Address sits at 100mm unless a long title pushes it down
        let address_y = cursor.below(4.0).max(100.0);
        let address_style = TextStyle::bold(14.0, palette::VIOLET_400);
        let address = metrics::fit_text(
            &metrics::normalize(&property.address.to_uppercase()),
            address_style.face,
            address_style.size,
            PAGE_WIDTH - 40.0,
        );
        self.canvas
            .text(text_x, address_y, &address, address_style)?;

        self.viewer_block(request)?;
        self.founder_view(COVER_AUDIT)
    }

    fn viewer_block(&mut self, request: &DossierRequest) -> Result<(), DossierError> {
        let viewer = &request.viewer;
        let block = Rect::new(MARGIN, 160.0, PAGE_WIDTH - 2.0 * MARGIN, 65.0);
        let text_x = 25.0;
        let text_width = PAGE_WIDTH - 40.0;

        self.canvas
            .fill_rounded_rect(block, 4.0, palette::SLATE_900)?;
        self.canvas.fill_rect(
            Rect::new(block.x, block.y, 3.0, block.height),
            palette::VIOLET_600,
        )?;

        let mut cursor = Cursor::at(block.y);
        self.canvas.text(
            text_x,
            cursor.advance(18.0),
            "INTEL PREPARED FOR",
            TextStyle::bold(10.0, palette::VIOLET_400),
        )?;

        let name_style = TextStyle::bold(24.0, palette::WHITE);
        let name = metrics::fit_text(
            &metrics::normalize(&viewer.name.to_uppercase()),
            name_style.face,
            name_style.size,
            text_width,
        );
        self.canvas
            .text(text_x, cursor.advance(17.0), &name, name_style)?;

        let contact = format!(
            "AUTHENTICATED CONTACT: {}",
            self.config.brand.contact(&viewer.phone)
        );
        self.canvas.text(
            text_x,
            cursor.advance(15.0),
            &contact,
            TextStyle::bold(11.0, palette::TEXT_GRAY),
        )
    }

    fn specification_page(&mut self, property: &PropertyRecord) -> Result<(), DossierError> {
        self.new_page(PAGE_TITLES[1])?;
        let mut cursor = Cursor::at(CONTENT_TOP);

        self.canvas.text(
            MARGIN,
            cursor.y(),
            "ASSET INTELLIGENCE SUMMARY",
            TextStyle::bold(20.0, palette::WHITE),
        )?;

        let description_style = TextStyle::regular(10.0, palette::TEXT_GRAY);
        let width = PAGE_WIDTH - 2.0 * MARGIN;
        let top = cursor.advance(10.0);
        let description = metrics::clamp_lines(
            self.canvas
                .wrap(&property.description, description_style, width),
            description_line_budget(top, metrics::line_height(description_style.size)),
            description_style.face,
            description_style.size,
            width,
        );
        let consumed =
            self.canvas
                .text_lines(MARGIN, top, &description, description_style)?;
        cursor.advance(consumed + DESCRIPTION_GAP);

        self.spec_grid(property, &mut cursor)?;
        self.offering_matrix(property, &mut cursor)?;

        let developer = property.developer_name().unwrap_or("the developer");
        self.founder_view(&format!(
            "Project transparency is non-negotiable. We've vetted {}'s track record for \
             delivery. This matrix is based on active inventory audits for Q4 2025.",
            developer
        ))
    }

    fn spec_grid(&mut self, property: &PropertyRecord, cursor: &mut Cursor) -> Result<(), DossierError> {
        let tiles = spec_tiles(property);
        let value_style = TextStyle::bold(10.0, palette::WHITE);
        let top = cursor.y();

        for (i, (label, value)) in tiles.iter().enumerate() {
            let x = MARGIN + (i % 2) as f32 * TILE_PITCH_X;
            let y = top + (i / 2) as f32 * TILE_PITCH_Y;

            self.canvas.fill_rounded_rect(
                Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT),
                2.0,
                palette::SLATE_900,
            )?;
            self.canvas.text(
                x + 5.0,
                y + 7.0,
                label,
                TextStyle::regular(7.0, palette::TEXT_GRAY),
            )?;
            let value = metrics::fit_text(
                &metrics::normalize(value),
                value_style.face,
                value_style.size,
                TILE_WIDTH - 10.0,
            );
            self.canvas.text(x + 5.0, y + 13.0, &value, value_style)?;
        }

        let rows = tiles.len().div_ceil(2);
        cursor.advance(rows as f32 * TILE_PITCH_Y);
        Ok(())
    }

    fn offering_matrix(
        &mut self,
        property: &PropertyRecord,
        cursor: &mut Cursor,
    ) -> Result<(), DossierError> {
        self.canvas.text(
            MARGIN,
            cursor.advance(MATRIX_HEADING_GAP),
            "DETAILED OFFERING MATRIX",
            TextStyle::bold(20.0, palette::WHITE),
        )?;

        let tiers = pricing_tiers(property, &self.config.pricing);
        let header = MATRIX_HEADER.map(str::to_string);
        let rows = std::iter::once(header).chain(
            tiers
                .iter()
                .map(|tier| [tier.label.clone(), tier.area_display(), tier.price_display()]),
        );

        cursor.advance(MATRIX_FIRST_ROW);
        for (i, row) in rows.enumerate() {
            let y = cursor.below(i as f32 * MATRIX_ROW_PITCH);
            let band = Rect::new(
                MARGIN,
                y - MATRIX_BAND_RISE,
                PAGE_WIDTH - 2.0 * MARGIN,
                MATRIX_BAND_HEIGHT,
            );
            let style = if i == 0 {
                self.canvas.fill_rect(band, palette::VIOLET_600)?;
                TextStyle::bold(9.0, palette::WHITE)
            } else {
                if i % 2 == 0 {
                    self.canvas.fill_rect(band, palette::SLATE_900)?;
                }
                TextStyle::regular(9.0, palette::TEXT_GRAY)
            };

            for (x, cell) in MATRIX_COLUMNS.iter().zip(row.iter()) {
                self.canvas.text(*x, y, cell, style)?;
            }
        }
        Ok(())
    }

    fn valuation_page(&mut self, request: &DossierRequest) -> Result<(), DossierError> {
        self.new_page(PAGE_TITLES[2])?;
        let mut cursor = Cursor::at(CONTENT_TOP);

        self.canvas.text(
            MARGIN,
            cursor.y(),
            "FAIR-VALUE DECODER",
            TextStyle::bold(22.0, palette::WHITE),
        )?;

        let panel = Rect::new(MARGIN, cursor.below(12.0), PAGE_WIDTH - 2.0 * MARGIN, 55.0);
        self.canvas
            .fill_rounded_rect(panel, 4.0, palette::SLATE_900)?;

        let config = self.config;
        let valuation = &config.valuation;
        let fair = resolve_fair_value(&request.property, valuation);
        cursor.advance(28.0);
        for (i, line) in valuation_lines(&fair, valuation).iter().enumerate() {
            let y = cursor.below(i as f32 * VALUATION_LINE_PITCH);
            let style = if line.emphasis {
                TextStyle::bold(10.0, palette::LIME_400)
            } else {
                TextStyle::regular(10.0, palette::TEXT_GRAY)
            };
            self.canvas.text(25.0, y, line.label, style)?;
            self.canvas
                .text_right(PAGE_WIDTH - 25.0, y, &line.value, style)?;
        }

        if let Some(steps) = request.commute() {
            let steps = steps.rendered(config.route.max_steps);
            debug!("Rendering {} commute steps", steps.len());

            let mut cursor = Cursor::at(135.0);
            self.canvas.text(
                MARGIN,
                cursor.y(),
                COMMUTE_HEADING,
                TextStyle::bold(20.0, palette::WHITE),
            )?;

            let step_style = TextStyle::regular(9.0, palette::TEXT_GRAY);
            cursor.advance(15.0);
            for (i, step) in steps.iter().enumerate() {
                let y = cursor.below(i as f32 * STEP_PITCH);
                self.canvas
                    .fill_circle(Point::new(18.0, y - 1.0), 0.5, palette::VIOLET_600)?;
                let line = metrics::fit_text(
                    &metrics::normalize(&format!("{}. {}", i + 1, step.trim())),
                    step_style.face,
                    step_style.size,
                    PAGE_WIDTH - 22.0 - MARGIN,
                );
                self.canvas.text(22.0, y, &line, step_style)?;
            }
        }

        self.founder_view(VALUATION_AUDIT)
    }
}

/// Description lines that fit between `top` and the founder callout once the
/// spec grid and offering matrix are placed below them.
fn description_line_budget(top: f32, line_height: f32) -> usize {
    let grid = SPEC_TILE_COUNT.div_ceil(2) as f32 * TILE_PITCH_Y;
    let matrix = MATRIX_HEADING_GAP
        + MATRIX_FIRST_ROW
        + TIER_COUNT as f32 * MATRIX_ROW_PITCH
        + (MATRIX_BAND_HEIGHT - MATRIX_BAND_RISE);
    let floor = PAGE_HEIGHT - FOUNDER_OFFSET - PANEL_CLEARANCE;
    let available = floor - top - DESCRIPTION_GAP - grid - matrix;
    (available / line_height).floor().max(1.0) as usize
}

/// Label/value pairs for the specification grid, with placeholders for
/// anything the record leaves out.
pub fn spec_tiles(property: &PropertyRecord) -> [(&'static str, String); SPEC_TILE_COUNT] {
    [
        (
            "DEVELOPER ENTITY",
            property.developer_name().unwrap_or("Tier-1 Verified").to_string(),
        ),
        (
            "RERA AUTHENTICATION",
            property.rera().unwrap_or("PRM/KA/RERA/Applied").to_string(),
        ),
        (
            "POSSESSION HORIZON",
            property
                .completion()
                .unwrap_or("Estimated 2027-2028")
                .to_string(),
        ),
        (
            "VERTICAL STRUCTURE",
            match property.total_floors {
                Some(floors) if floors > 0 => format!("G + {} Floors", floors),
                _ => "High-Rise Tier".to_string(),
            },
        ),
        ("AUDITED CONFIG", format!("{} BHK Elite", property.beds)),
        ("PRECISION AREA", format!("{:.0} Sq.Ft (Super)", property.sqft)),
    ]
}
