use crate::decoder::Stroke;
use crate::entities::Piece;
use crate::geometry::primitives::Bounds;
use crate::util::DecoderConfig;

/// Turns runs into named [`Piece`]s.
///
/// Rules, first match wins: a name band containing the top edge (max y) of the run,
/// then the small-part size rules, then the label pool cycled by position.
pub fn name_segments(runs: Vec<Stroke>, config: &DecoderConfig) -> Vec<Piece> {
    runs.into_iter()
        .enumerate()
        .map(|(index, run)| {
            let bounds = Bounds::from_points(&run.points);
            let name = resolve_name(index, &bounds, config);
            Piece::new(name, run.points, run.commands)
        })
        .collect()
}

fn resolve_name(index: usize, bounds: &Bounds, config: &DecoderConfig) -> String {
    if let Some(band) = config.name_bands.iter().find(|b| b.contains(bounds.max_y())) {
        return band.label.clone();
    }
    if let Some(rule) = config
        .small_part_labels
        .iter()
        .find(|r| r.fits(bounds.width(), bounds.height()))
    {
        return rule.label.clone();
    }
    match config.label_pool.is_empty() {
        false => config.label_pool[index % config.label_pool.len()].clone(),
        true => format!("PIECE {}", index + 1),
    }
}
