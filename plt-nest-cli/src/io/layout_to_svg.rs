use plt_nest::entities::{NestingPiece, NestingResult, PenCommand, SizeClass};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Rectangle, Text, Title};

use crate::io::svg_util::{SvgDrawOptions, change_brightness};

/// Draws the used part of the fabric strip with every placed piece on it.
///
/// The roll starts at the top of the drawing, `y` grows downward as in the layout.
pub fn nesting_result_to_svg(result: &NestingResult, options: SvgDrawOptions) -> Document {
    let theme = options.theme.get_theme();
    let width = result.bounds.width;
    //an empty layout still gets a visible strip
    let length = f64::max(result.fabric_length, width * 0.05);

    let margin = f64::max(width, length) * 0.025;
    let stroke_width = f64::min(width, length) * 0.001 * theme.stroke_width_multiplier;

    let fabric = Group::new()
        .set("id", "fabric")
        .add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", width)
                .set("height", length)
                .set("fill", theme.fabric_fill)
                .set("stroke", "black")
                .set("stroke-width", 2.0 * stroke_width),
        )
        .add(Title::new(format!(
            "fabric, width: {:.1}, length: {:.1}, efficiency: {:.2}%",
            width, result.fabric_length, result.efficiency
        )));

    let pieces = result
        .pieces
        .iter()
        .fold(Group::new().set("id", "pieces"), |group, piece| {
            group.add(piece_group(piece, options, stroke_width))
        });

    Document::new()
        .set(
            "viewBox",
            (-margin, -margin, width + 2.0 * margin, length + 2.0 * margin),
        )
        .add(fabric)
        .add(pieces)
}

fn piece_group(piece: &NestingPiece, options: SvgDrawOptions, stroke_width: f64) -> Group {
    let theme = options.theme.get_theme();
    let bbox = piece.absolute_bbox();
    let fill = match piece.size_class {
        SizeClass::Large => theme.large_piece_fill,
        SizeClass::Small => theme.small_piece_fill,
    };
    let border = change_brightness(fill, 0.5).unwrap_or_else(|| "black".to_string());

    let mut group = Group::new()
        .set("id", piece.id.as_str())
        .add(Title::new(format!(
            "{}, id: {}, rotation: {}, position: ({:.1}, {:.1})",
            piece.name,
            piece.id,
            piece.rotation,
            piece.position.x(),
            piece.position.y()
        )))
        .add(
            Rectangle::new()
                .set("x", bbox.min_x())
                .set("y", bbox.min_y())
                .set("width", bbox.width())
                .set("height", bbox.height())
                .set("fill", fill)
                .set("stroke", border)
                .set("stroke-width", stroke_width),
        );

    if options.outlines {
        group = group.add(
            Path::new()
                .set("d", stroke_data(piece))
                .set("fill", "none")
                .set("stroke", theme.outline_stroke)
                .set("stroke-width", stroke_width),
        );
    }
    if options.labels {
        let center = bbox.centroid();
        let font_size = f64::min(bbox.width(), bbox.height()) * 0.15;
        group = group.add(
            Text::new(piece.name.as_str())
                .set("x", center.x())
                .set("y", center.y())
                .set("font-size", font_size)
                .set("font-family", "monospace")
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle"),
        );
    }
    group
}

/// Replays the pen events of a placed piece: pen-up moves, pen-down draws.
fn stroke_data(piece: &NestingPiece) -> Data {
    piece
        .absolute_points()
        .zip(piece.commands.iter())
        .enumerate()
        .fold(Data::new(), |data, (i, (p, command))| {
            match (i, command) {
                (0, _) | (_, PenCommand::PenUp) => data.move_to((p.x(), p.y())),
                (_, PenCommand::PenDown) => data.line_to((p.x(), p.y())),
            }
        })
}
