//! Handing level changes over to the presentation layer.

use crate::prelude::*;

/// Instant events the presentation layer can show.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Effect {
    /// Rock was hit but held.
    Dig,

    /// Rock was dug out.
    Cleared,
}

/// Receiver for tile updates and effects from a level.
pub trait Presenter {
    /// Draw the cell at `pos` with its current art and buried bonus.
    fn render_tile(
        &mut self,
        pos: IVec2,
        tile: &TileVariant,
        bonus: Option<BonusKind>,
    );

    fn play_effect(&mut self, effect: Effect, pos: IVec2);

    /// Draw the selection marker over `pos`.
    fn highlight(&mut self, _pos: IVec2) {}
}

impl Level {
    /// Send everything that changed since the last call to `out`.
    ///
    /// Tile updates go out before effects.
    pub fn present(&mut self, out: &mut impl Presenter) {
        while let Some(pos) = self.redraw.pop_front() {
            if let Some(cell) = self.cells.get(pos) {
                out.render_tile(pos, &cell.tile, cell.bonus);
            }
        }

        while let Some((effect, pos)) = self.effects.pop_front() {
            out.play_effect(effect, pos);
        }
    }

    /// Draw the whole level, with an optional selection marker on top.
    pub fn draw_all(&self, out: &mut impl Presenter, selection: Option<IVec2>) {
        for (pos, cell) in self.cells.iter() {
            out.render_tile(pos, &cell.tile, cell.bonus);
        }

        if let Some(pos) = selection.filter(|&p| self.contains(p)) {
            out.highlight(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Eq, PartialEq, Debug)]
    enum Event {
        Tile(IVec2, TileVariant),
        Effect(Effect, IVec2),
        Highlight(IVec2),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl Presenter for Recorder {
        fn render_tile(
            &mut self,
            pos: IVec2,
            tile: &TileVariant,
            _bonus: Option<BonusKind>,
        ) {
            self.0.push(Event::Tile(pos, *tile));
        }

        fn play_effect(&mut self, effect: Effect, pos: IVec2) {
            self.0.push(Event::Effect(effect, pos));
        }

        fn highlight(&mut self, pos: IVec2) {
            self.0.push(Event::Highlight(pos));
        }
    }

    #[test]
    fn changes_are_sent_once() {
        let mut level = Level::from_map(
            "...
             .##
             .##",
            &LevelSpec::default(),
        )
        .unwrap();

        let mut out = Recorder::default();
        level.present(&mut out);
        assert!(out.0.is_empty());

        level.hit(ivec2(1, 1)).unwrap();
        level.present(&mut out);

        let tiles: Vec<IVec2> = out
            .0
            .iter()
            .filter_map(|e| match e {
                Event::Tile(p, _) => Some(*p),
                _ => None,
            })
            .collect();
        // The dug cell and the three rocks next to it.
        assert_eq!(tiles.len(), 4);
        assert!(tiles.contains(&ivec2(1, 1)));
        assert_eq!(
            out.0.last(),
            Some(&Event::Effect(Effect::Cleared, ivec2(1, 1)))
        );
        assert!(out.0.contains(&Event::Tile(ivec2(1, 1), TileVariant::Empty)));

        out.0.clear();
        level.present(&mut out);
        assert!(out.0.is_empty());
    }

    #[test]
    fn selection_is_an_overlay() {
        let level =
            Level::from_map("...\n.##\n.##", &LevelSpec::default()).unwrap();
        let before = level.tiles();

        let mut out = Recorder::default();
        level.draw_all(&mut out, Some(ivec2(1, 0)));
        assert_eq!(out.0.len(), 10);
        assert_eq!(out.0[9], Event::Highlight(ivec2(1, 0)));
        assert_eq!(level.tiles(), before);

        let mut out = Recorder::default();
        level.draw_all(&mut out, Some(ivec2(5, 5)));
        assert_eq!(out.0.len(), 9);

        let mut out = Recorder::default();
        level.draw_all(&mut out, None);
        assert!(out.0.iter().all(|e| matches!(e, Event::Tile(..))));
    }
}
