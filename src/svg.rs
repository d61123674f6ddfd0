use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::SolvetraceResult,
    scene::Scene,
    timeline::{Directive, Target, Timeline},
};

/// Renders the annotated scene graph as an SVG 1.1 document with SMIL `set`
/// directives. Pure string construction; the only fallible step is the file
/// write in [`write_svg`].
pub fn render_document(scene: &Scene, timeline: &Timeline) -> String {
    let style = &scene.style;
    let geom = &scene.geometry;
    let directives = DirectiveIndex::build(timeline);

    let mut out = String::new();
    out.push_str(&format!(
        "<svg version=\"1.1\" baseProfile=\"full\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        geom.width, geom.height
    ));
    out.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        geom.width,
        geom.height,
        esc(&style.background_color)
    ));

    // Headline: title with date, byline, solver.
    out.push_str(&format!(
        "<text x=\"{m}\" y=\"{m}\" style=\"font-size: 15px; font-family: sans-serif;\">\
         <tspan style=\"font-weight: bold;\">{title}</tspan><tspan> - {date}</tspan></text>\n",
        m = style.margin,
        title = esc(&scene.title),
        date = esc(&scene.date)
    ));
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" style=\"font-size: 12px; font-family: sans-serif;\">{}</text>\n",
        style.margin,
        style.margin + 15.0,
        esc(&scene.byline)
    ));
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" style=\"font-size: 12px; font-family: sans-serif;\">Solver: {}</text>\n",
        style.margin,
        style.margin + 30.0,
        esc(&scene.solver_name)
    ));

    // Grid squares, with their color directives as children.
    out.push_str(&format!("<g stroke=\"{}\">\n", esc(&style.grid_color)));
    for (idx, square) in scene.squares.iter().enumerate() {
        let o = geom.origin(square.pos);
        let fill = if square.fillable {
            &style.fillable_color
        } else {
            &style.blocked_color
        };
        let sets = directives.squares.get(&idx).map_or(&[][..], Vec::as_slice);
        if sets.is_empty() {
            out.push_str(&format!(
                "<rect width=\"{s}\" height=\"{s}\" x=\"{x}\" y=\"{y}\" fill=\"{fill}\"/>\n",
                s = geom.sq_size,
                x = o.x,
                y = o.y,
                fill = esc(fill)
            ));
        } else {
            out.push_str(&format!(
                "<rect width=\"{s}\" height=\"{s}\" x=\"{x}\" y=\"{y}\" fill=\"{fill}\">",
                s = geom.sq_size,
                x = o.x,
                y = o.y,
                fill = esc(fill)
            ));
            for d in sets {
                out.push_str(&render_set(d));
            }
            out.push_str("</rect>\n");
        }
    }
    out.push_str("</g>\n");

    // Square labels.
    out.push_str(&format!(
        "<g style=\"font-size: {}px; font-family: {}\">\n",
        geom.label_size(),
        esc(&style.label_font)
    ));
    for label in &scene.labels {
        let a = geom.label_anchor(label.pos);
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\">{}</text>\n",
            a.x,
            a.y,
            esc(&label.text)
        ));
    }
    out.push_str("</g>\n");

    // Clue texts, hidden until a selectClue directive reveals one.
    let clue_anchor = geom.clue_anchor();
    out.push_str(&format!(
        "<g style=\"font-size: {}px; font-family: {}\" text-anchor=\"middle\" visibility=\"hidden\">\n",
        geom.clue_size(),
        esc(&style.clue_font)
    ));
    for (idx, clue) in scene.clues.iter().enumerate() {
        let sets = directives.clues.get(&idx).map_or(&[][..], Vec::as_slice);
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\">{}",
            clue_anchor.x,
            clue_anchor.y,
            esc(&clue.text)
        ));
        for d in sets {
            out.push_str(&render_set(d));
        }
        out.push_str("</text>\n");
    }
    out.push_str("</g>\n");

    // Static timer digits.
    out.push_str("<g>\n");
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" style=\"font-size: {}px; font-family: {}; font-weight: bold\" visibility=\"collapse\">",
        style.margin,
        geom.progress_baseline(),
        geom.progress_size(),
        esc(&style.progress_font)
    ));
    for minute in &scene.timer.minutes {
        out.push_str(&format!("<tspan>{}</tspan>", esc(minute)));
    }
    out.push_str("<tspan>:</tspan>");
    for second in &scene.timer.seconds {
        out.push_str(&format!("<tspan>{}</tspan>", esc(second)));
    }
    out.push_str("</text>\n</g>\n");

    // Completion marker.
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" style=\"font-size: {}px; font-family: {}; font-weight: bold\" text-anchor=\"end\" visibility=\"hidden\">Complete!",
        geom.width - style.margin,
        geom.progress_baseline(),
        geom.progress_size(),
        esc(&style.progress_font)
    ));
    for d in &directives.complete {
        out.push_str(&render_set(d));
    }
    out.push_str("</text>\n");

    // Entered glyphs, one text element per update, revealed by directive.
    out.push_str(&format!(
        "<g style=\"font-size: {}px; font-family: {}\" text-anchor=\"middle\" visibility=\"hidden\">\n",
        geom.fill_size(),
        esc(&style.fill_font)
    ));
    for (idx, glyph) in timeline.glyphs.iter().enumerate() {
        let a = geom.glyph_anchor(glyph.pos);
        let sets = directives.glyphs.get(&idx).map_or(&[][..], Vec::as_slice);
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\">{}",
            a.x,
            a.y,
            esc(&glyph.glyph)
        ));
        for d in sets {
            out.push_str(&render_set(d));
        }
        out.push_str("</text>\n");
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}

/// Renders the document and writes it to `path`. I/O failures surface
/// unmodified; nothing is written unless the compile already succeeded.
pub fn write_svg(path: &Path, scene: &Scene, timeline: &Timeline) -> SolvetraceResult<()> {
    let doc = render_document(scene, timeline);
    std::fs::write(path, doc)?;
    Ok(())
}

fn render_set(d: &Directive) -> String {
    match d.end_ms {
        Some(end) => format!(
            "<set attributeName=\"{}\" to=\"{}\" begin=\"{}ms\" end=\"{}ms\"/>",
            d.attr.name(),
            esc(&d.to),
            d.begin_ms,
            end
        ),
        None => format!(
            "<set attributeName=\"{}\" to=\"{}\" begin=\"{}ms\"/>",
            d.attr.name(),
            esc(&d.to),
            d.begin_ms
        ),
    }
}

/// Directives grouped by target, in emission order.
#[derive(Default)]
struct DirectiveIndex<'a> {
    squares: HashMap<usize, Vec<&'a Directive>>,
    glyphs: HashMap<usize, Vec<&'a Directive>>,
    clues: HashMap<usize, Vec<&'a Directive>>,
    complete: Vec<&'a Directive>,
}

impl<'a> DirectiveIndex<'a> {
    fn build(timeline: &'a Timeline) -> Self {
        let mut index = Self::default();
        for d in &timeline.directives {
            match d.target {
                Target::Square(id) => index.squares.entry(id.0).or_default().push(d),
                Target::Glyph(id) => index.glyphs.entry(id.0).or_default().push(d),
                Target::Clue(id) => index.clues.entry(id.0).or_default().push(d),
                Target::CompleteMarker => index.complete.push(d),
            }
        }
        index
    }
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::SessionRecord, style::Style, timeline::compile};

    fn record() -> SessionRecord {
        serde_json::from_str(
            r#"{
                "title": "Mini & More", "date": "2014-01-13", "byline": "By A. Setter",
                "solverName": "kris",
                "initialState": [
                    { "x": 0, "y": 0, "fill": "", "label": "1" },
                    { "x": 1, "y": 0, "fill": "" },
                    { "x": 0, "y": 1, "fill": null },
                    { "x": 1, "y": 1, "fill": "", "label": "2" }
                ],
                "clueSections": {
                    "Across": [ { "label": "1", "text": "Salt <partner>" } ]
                },
                "events": [
                    { "type": "select", "timestamp": 1000.0, "x": 0, "y": 0 },
                    { "type": "update", "timestamp": 2000.0, "x": 0, "y": 0, "fill": "A" },
                    { "type": "submit", "timestamp": 3000.0, "success": true }
                ]
            }"#,
        )
        .unwrap()
    }

    fn document() -> String {
        let record = record();
        let scene = Scene::build(Style::default(), &record).unwrap();
        let timeline = compile(&scene, &record.events).unwrap();
        render_document(&scene, &timeline)
    }

    #[test]
    fn blocked_and_fillable_colors_are_exclusive() {
        let doc = document();
        assert_eq!(doc.matches("fill=\"black\"").count(), 1);
        assert_eq!(doc.matches("fill=\"white\"").count(), 3);
    }

    #[test]
    fn directives_render_as_smil_sets() {
        let doc = document();
        assert!(doc.contains("<set attributeName=\"fill\" to=\"yellow\" begin=\"0ms\"/>"));
        assert!(doc.contains("<set attributeName=\"visibility\" to=\"visible\" begin=\"100ms\"/>"));
        // successful submit reveals the marker, never closing
        assert!(doc.contains("Complete!<set attributeName=\"visibility\" to=\"visible\" begin=\"200ms\"/>"));
    }

    #[test]
    fn text_content_is_escaped() {
        let doc = document();
        assert!(doc.contains("Mini &amp; More"));
        assert!(doc.contains("1. Salt &lt;partner&gt;"));
    }

    #[test]
    fn empty_log_renders_static_document_without_sets() {
        let mut record = record();
        record.events.clear();
        let scene = Scene::build(Style::default(), &record).unwrap();
        let timeline = compile(&scene, &record.events).unwrap();
        let doc = render_document(&scene, &timeline);
        assert!(!doc.contains("<set "));
        assert!(doc.contains("visibility=\"hidden\">Complete!"));
    }

    #[test]
    fn timer_digits_are_static_placeholders() {
        let doc = document();
        assert!(doc.contains("<tspan>59</tspan><tspan>:</tspan><tspan>00</tspan>"));
        assert!(doc.contains("visibility=\"collapse\""));
    }
}
