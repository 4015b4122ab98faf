/// All game entity types: plain data plus tiny per-kind update rules.

use crate::config::Size;
use crate::spawn::Timers;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose center sits at `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, size: Size) -> Self {
        Self::new(cx - size.w / 2, cy - size.h / 2, size.w, size.h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Shift the rectangle back inside `[0, w] × [0, h]`.
    pub fn clamped_within(&self, viewport: Size) -> Rect {
        Rect {
            x: self.x.clamp(0, (viewport.w - self.w).max(0)),
            y: self.y.clamp(0, (viewport.h - self.h).max(0)),
            ..*self
        }
    }

    /// Overlap test. Rectangles that only share an edge count as touching,
    /// and touching is a hit.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn is_within(&self, viewport: Size) -> bool {
        self.left() >= 0 && self.top() >= 0 && self.right() <= viewport.w && self.bottom() <= viewport.h
    }
}

// ── Visual handles ───────────────────────────────────────────────────────────

/// Opaque handle to an image owned by the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    id: usize,
    size: Size,
}

impl Sprite {
    pub const fn new(id: usize, size: Size) -> Self {
        Self { id, size }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The sprite's own rectangle with its top-left corner at `(x, y)`.
    pub fn rect_at(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.size.w, self.size.h)
    }
}

/// Every image the game draws, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Assets {
    pub background: Sprite,
    pub enemy: Sprite,
    pub bonus: Sprite,
    /// Goose animation frames in playback order. Never empty.
    pub player_frames: Vec<Sprite>,
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    /// Flies in from the right, moving left.
    Enemy,
    /// Falls from the top, moving down.
    Bonus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub sprite: Sprite,
    pub rect: Rect,
    /// Pixels per tick along the axis implied by `kind`.
    pub speed: i32,
}

impl Entity {
    /// Where this entity is after one tick of its own motion.
    pub fn advanced(&self) -> Entity {
        let rect = match self.kind {
            EntityKind::Player => self.rect,
            EntityKind::Enemy => self.rect.translated(-self.speed, 0),
            EntityKind::Bonus => self.rect.translated(0, self.speed),
        };
        Entity { rect, ..self.clone() }
    }

    /// True once the entity has fully left the viewport on its exit edge.
    pub fn has_exited(&self, viewport: Size) -> bool {
        match self.kind {
            EntityKind::Player => false,
            EntityKind::Enemy => self.rect.right() < 0,
            EntityKind::Bonus => self.rect.top() >= viewport.h,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Entity,
    pub frames: Vec<Sprite>,
    /// Index into `frames` of the image currently shown.
    pub frame: usize,
}

impl Player {
    /// A fresh player showing the first animation frame.
    ///
    /// `frames` must not be empty; `Config::validate` rejects a zero frame
    /// count before any player is built. Panics otherwise.
    pub fn new(frames: Vec<Sprite>, rect: Rect, speed: i32) -> Self {
        let sprite = frames[0];
        Self {
            body: Entity {
                kind: EntityKind::Player,
                sprite,
                rect,
                speed,
            },
            frames,
            frame: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn sprite(&self) -> Sprite {
        self.body.sprite
    }

    /// Step the animation forward by `steps` frames, wrapping around.
    pub fn animated(&self, steps: u32) -> Player {
        if self.frames.is_empty() || steps == 0 {
            return self.clone();
        }
        let frame = (self.frame + steps as usize) % self.frames.len();
        Player {
            body: Entity {
                sprite: self.frames[frame],
                ..self.body.clone()
            },
            frame,
            ..self.clone()
        }
    }

    pub fn moved_to(&self, rect: Rect) -> Player {
        Player {
            body: Entity { rect, ..self.body.clone() },
            ..self.clone()
        }
    }
}

// ── Background ───────────────────────────────────────────────────────────────

/// Two copies of the background image laid side by side and scrolled left,
/// giving an endless horizontal loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub sprite: Sprite,
    /// Left edges of the two copies. Always exactly one image width apart.
    pub offsets: [i32; 2],
}

impl Background {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            offsets: [0, sprite.size().w],
        }
    }

    pub fn width(&self) -> i32 {
        self.sprite.size().w
    }

    /// Scroll both copies left; a copy that has slid a full width off-screen
    /// jumps to the right of its partner.
    pub fn scrolled(&self, speed: i32) -> Background {
        let width = self.width();
        let offsets = self.offsets.map(|x| {
            let x = x - speed;
            if x <= -width {
                x + 2 * width
            } else {
                x
            }
        });
        Background { offsets, ..self.clone() }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    GameOver,
}

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    /// Best score seen by this process, including the persisted record.
    pub high_score: u32,
    pub player: Player,
    pub enemies: Vec<Entity>,
    pub bonuses: Vec<Entity>,
    pub background: Background,
    pub timers: Timers,
    /// Gameplay ticks since the last reset.
    pub tick: u64,
    pub viewport: Size,
}
