use std::{fmt, path::PathBuf};

use anyhow::bail;
use clap::Parser;

use engine::prelude::*;
use util::{Grid, Logos};

#[derive(Parser, Debug)]
#[command(about = "Generate a level, dig into it and print the result")]
struct Args {
    #[arg(long, value_parser = |e: &str| Ok::<Logos, &str>(Logos::new(e)), help = "Level seed")]
    seed: Option<Logos>,

    #[arg(long, value_name = "FILE")]
    /// Level spec file in IDM format.
    config: Option<PathBuf>,

    #[arg(long)]
    /// Level generator, overrides the one from the spec.
    mode: Option<Strategy>,

    #[arg(long, value_name = "X,Y", value_parser = parse_pos)]
    /// Hit the cell once, repeat the option to dig more.
    dig: Vec<IVec2>,

    #[arg(long, default_value = "0")]
    /// Extra hazards to spawn after generation.
    hazards: usize,
}

fn parse_pos(s: &str) -> anyhow::Result<IVec2> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y");
    };
    Ok(ivec2(x.trim().parse()?, y.trim().parse()?))
}

/// Character map of a level, `.` for open, `#` for rock, bonus letters
/// for rock with something in it and `@` for the player start.
struct TextMap(Grid<char>);

impl TextMap {
    fn new(level: &Level) -> Self {
        TextMap(Grid::new(ivec2(level.width(), level.height()), ' '))
    }
}

impl Presenter for TextMap {
    fn render_tile(
        &mut self,
        pos: IVec2,
        tile: &TileVariant,
        bonus: Option<BonusKind>,
    ) {
        let c = match (tile, bonus) {
            (TileVariant::Empty, _) => '.',
            (TileVariant::Wall(_), Some(bonus)) => bonus.glyph(),
            (TileVariant::Wall(_), None) => '#',
        };
        self.0.set(pos, c);
    }

    fn play_effect(&mut self, effect: Effect, pos: IVec2) {
        log::debug!("{effect:?} at {pos}");
    }

    fn highlight(&mut self, pos: IVec2) {
        self.0.set(pos, '@');
    }
}

impl fmt::Display for TextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.0.height() {
            let line: String =
                (0..self.0.width()).map(|x| self.0[ivec2(x, y)]).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut spec = match &args.config {
        Some(path) => LevelSpec::load(path)?,
        None => LevelSpec::default(),
    };
    if let Some(mode) = args.mode {
        spec.strategy = mode;
    }

    let seed = args
        .seed
        .unwrap_or_else(|| Logos::sample(&mut rand::thread_rng(), 10));
    log::info!("seed: {seed}");

    let mut level = Level::new(&spec, &seed)?;
    let mut map = TextMap::new(&level);
    level.draw_all(&mut map, Some(level.start()));

    for _ in 0..args.hazards {
        if let Err(e) = level.spawn_hazard() {
            log::warn!("{e}");
            break;
        }
    }

    let mut payout = 0;
    for &pos in &args.dig {
        match level.hit(pos) {
            Ok(DigOutcome::Cleared { payout: p }) => payout += p,
            Ok(DigOutcome::Absorbed) => {}
            Err(e) => log::warn!("{e}"),
        }
    }
    level.present(&mut map);

    print!("{map}");
    log::info!(
        "{} digs, total payout {payout}, {} hazards buried",
        args.dig.len(),
        level.hazard_count()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!(parse_pos("3,4").unwrap(), ivec2(3, 4));
        assert_eq!(parse_pos(" -1, 2").unwrap(), ivec2(-1, 2));
        assert!(parse_pos("3").is_err());
        assert!(parse_pos("a,b").is_err());
    }

    #[test]
    fn text_map() {
        let mut level = Level::from_map(
            "...
             .##
             ###",
            &LevelSpec::default(),
        )
        .unwrap();
        let mut map = TextMap::new(&level);
        level.draw_all(&mut map, Some(level.start()));
        level.hit(ivec2(1, 1)).unwrap();
        level.present(&mut map);

        assert_eq!(map.to_string(), "@..\n..#\n###\n");
    }
}
