//! Lookup table from piece kinds to movement templates and from tokens to
//! rule variants.
//!
//! A [`Registry`] is built once at startup and handed to every [`Board`](crate::Board);
//! nothing here is global state.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::piece::{Piece, Step, Template};
use crate::piece_kind::PieceKind;

/// The rule set a board is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Orthodox chess.
    #[default]
    Standard,
    /// Explosive capture: every capture blasts the 3x3 area around the
    /// destination, and destroying a king wins.
    Atomic,
}

impl Variant {
    /// Total number of variants.
    pub const COUNT: usize = 2;

    /// All variants in index order.
    pub const ALL: [Variant; 2] = [Variant::Standard, Variant::Atomic];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Selection token. Standard chess is the empty token.
    pub const fn token(self) -> &'static str {
        match self {
            Variant::Standard => "",
            Variant::Atomic => "atomic",
        }
    }

    /// Return `true` if captures explode.
    #[inline]
    pub const fn is_atomic(self) -> bool {
        matches!(self, Variant::Atomic)
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Variant, ConfigError> {
        Registry::standard()
            .variant(s)
            .ok_or_else(|| ConfigError::UnknownVariant {
                token: s.to_string(),
            })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Standard => write!(f, "standard"),
            Variant::Atomic => write!(f, "atomic"),
        }
    }
}

/// Builds the movement template of one piece under a variant.
pub type TemplateFn = fn(&Piece, Variant) -> Template;

/// Immutable lookup table of template constructors and variants.
#[derive(Clone, Copy)]
pub struct Registry {
    templates: [Option<TemplateFn>; PieceKind::COUNT],
    variants: [bool; Variant::COUNT],
}

impl Registry {
    /// A registry with nothing registered.
    pub const fn empty() -> Registry {
        Registry {
            templates: [None; PieceKind::COUNT],
            variants: [false; Variant::COUNT],
        }
    }

    /// All six piece kinds and both variants.
    pub fn standard() -> Registry {
        Registry::empty()
            .with_piece(PieceKind::Pawn, pawn_template)
            .with_piece(PieceKind::Knight, knight_template)
            .with_piece(PieceKind::Bishop, bishop_template)
            .with_piece(PieceKind::Rook, rook_template)
            .with_piece(PieceKind::Queen, queen_template)
            .with_piece(PieceKind::King, king_template)
            .with_variant(Variant::Standard)
            .with_variant(Variant::Atomic)
    }

    /// Register the template constructor for `kind`.
    pub fn with_piece(mut self, kind: PieceKind, template: TemplateFn) -> Registry {
        self.templates[kind.index()] = Some(template);
        self
    }

    /// Make `variant` selectable by its token.
    pub fn with_variant(mut self, variant: Variant) -> Registry {
        self.variants[variant.index()] = true;
        self
    }

    /// Return `true` if `kind` has a template.
    pub fn has_piece(&self, kind: PieceKind) -> bool {
        self.templates[kind.index()].is_some()
    }

    /// Look up a registered variant by token. `"standard"` is accepted as an
    /// alias of the empty token.
    pub fn variant(&self, token: &str) -> Option<Variant> {
        let token = token.trim();
        let token = if token.eq_ignore_ascii_case("standard") {
            ""
        } else {
            token
        };
        Variant::ALL
            .into_iter()
            .filter(|v| self.variants[v.index()])
            .find(|v| v.token().eq_ignore_ascii_case(token))
    }

    /// Movement template of `piece` under `variant`.
    ///
    /// # Panics
    ///
    /// Panics if the piece's kind was never registered. Boards are validated
    /// against their registry on construction, so this indicates a bug.
    pub fn template(&self, piece: &Piece, variant: Variant) -> Template {
        match self.templates[piece.kind().index()] {
            Some(build) => build(piece, variant),
            None => panic!("no movement template registered for {:?}", piece.kind()),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pieces: Vec<_> = PieceKind::ALL
            .into_iter()
            .filter(|k| self.has_piece(*k))
            .collect();
        let variants: Vec<_> = Variant::ALL
            .into_iter()
            .filter(|v| self.variants[v.index()])
            .collect();
        f.debug_struct("Registry")
            .field("pieces", &pieces)
            .field("variants", &variants)
            .finish()
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

fn directions(dirs: &[(i8, i8)], limit: u8) -> Template {
    let mut template = Template::new();
    for &(dx, dy) in dirs {
        template.push(Step::new(dx, dy, limit));
    }
    template
}

/// Push one (two from the home rank), capture diagonally forward.
fn pawn_template(piece: &Piece, _variant: Variant) -> Template {
    let color = piece.color();
    let dy = color.pawn_direction();
    let push = if piece.square().rank() == color.pawn_rank() { 2 } else { 1 };
    Template::from_steps(&[
        Step::new(0, dy, push).quiet(),
        Step::new(1, dy, 1).attack_only(),
        Step::new(-1, dy, 1).attack_only(),
    ])
}

fn knight_template(_piece: &Piece, _variant: Variant) -> Template {
    directions(&KNIGHT_JUMPS, 1)
}

fn bishop_template(_piece: &Piece, _variant: Variant) -> Template {
    directions(&DIAGONAL, 0)
}

fn rook_template(_piece: &Piece, _variant: Variant) -> Template {
    directions(&ORTHOGONAL, 0)
}

fn queen_template(_piece: &Piece, _variant: Variant) -> Template {
    let mut template = directions(&ORTHOGONAL, 0);
    for &(dx, dy) in &DIAGONAL {
        template.push(Step::new(dx, dy, 0));
    }
    template
}

/// One step in every direction; in the atomic variant the king never captures.
fn king_template(_piece: &Piece, variant: Variant) -> Template {
    let mut template = Template::new();
    for &(dx, dy) in ORTHOGONAL.iter().chain(DIAGONAL.iter()) {
        let step = Step::new(dx, dy, 1);
        template.push(if variant.is_atomic() { step.quiet() } else { step });
    }
    template
}

#[cfg(test)]
mod tests {
    use super::{Registry, Variant};
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn standard_registers_everything() {
        let registry = Registry::standard();
        for kind in PieceKind::ALL {
            assert!(registry.has_piece(kind), "{kind:?} missing");
        }
    }

    #[test]
    fn variant_tokens() {
        let registry = Registry::standard();
        assert_eq!(registry.variant(""), Some(Variant::Standard));
        assert_eq!(registry.variant("standard"), Some(Variant::Standard));
        assert_eq!(registry.variant("atomic"), Some(Variant::Atomic));
        assert_eq!(registry.variant("Atomic"), Some(Variant::Atomic));
        assert_eq!(registry.variant("crazyhouse"), None);
        assert_eq!(Registry::empty().variant("atomic"), None);
        assert_eq!("atomic".parse::<Variant>().unwrap(), Variant::Atomic);
        assert!("horde".parse::<Variant>().is_err());
    }

    #[test]
    fn pawn_template_depends_on_rank() {
        let registry = Registry::standard();
        let home = Piece::new(PieceKind::Pawn, Color::White, Square::E2);
        let advanced = Piece::new(PieceKind::Pawn, Color::Black, Square::E5);
        let home_steps = registry.template(&home, Variant::Standard);
        let advanced_steps = registry.template(&advanced, Variant::Standard);
        assert_eq!(home_steps.as_slice()[0].limit, 2);
        assert_eq!(advanced_steps.as_slice()[0].limit, 1);
        assert_eq!(advanced_steps.as_slice()[0].dy, -1);
        assert!(!home_steps.as_slice()[0].can_attack);
        assert!(!home_steps.as_slice()[1].can_move);
    }

    #[test]
    fn atomic_king_cannot_capture() {
        let registry = Registry::standard();
        let king = Piece::new(PieceKind::King, Color::White, Square::E1);
        let standard = registry.template(&king, Variant::Standard);
        let atomic = registry.template(&king, Variant::Atomic);
        assert_eq!(standard.len(), 8);
        assert!(standard.as_slice().iter().all(|s| s.can_attack));
        assert!(atomic.as_slice().iter().all(|s| !s.can_attack && s.can_move));
    }

    #[test]
    fn slider_templates() {
        let registry = Registry::standard();
        let queen = Piece::new(PieceKind::Queen, Color::White, Square::D1);
        let knight = Piece::new(PieceKind::Knight, Color::White, Square::B1);
        let queen_steps = registry.template(&queen, Variant::Standard);
        assert_eq!(queen_steps.len(), 8);
        assert!(queen_steps.as_slice().iter().all(|s| s.limit == 0));
        let knight_steps = registry.template(&knight, Variant::Standard);
        assert_eq!(knight_steps.len(), 8);
        assert!(knight_steps.as_slice().iter().all(|s| s.limit == 1));
    }

    #[test]
    #[should_panic(expected = "no movement template")]
    fn unregistered_kind_panics() {
        let registry = Registry::empty().with_piece(PieceKind::King, |_, _| {
            crate::piece::Template::new()
        });
        let rook = Piece::new(PieceKind::Rook, Color::White, Square::A1);
        registry.template(&rook, Variant::Standard);
    }
}
