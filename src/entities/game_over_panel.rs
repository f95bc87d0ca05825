//! "GAME OVER" text and the restart button shown after a crash.

use crate::core::constants::{
    Dimensions, GAME_OVER_TEXT_HEIGHT, GAME_OVER_TEXT_WIDTH, GAME_OVER_TEXT_X, GAME_OVER_TEXT_Y,
    RESTART_HEIGHT, RESTART_WIDTH,
};
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};

#[derive(Debug, Clone)]
pub struct GameOverPanel {
    pub dimensions: Dimensions,
}

impl GameOverPanel {
    pub fn new(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    pub fn update_dimensions(&mut self, width: f64, height: Option<f64>) {
        self.dimensions.width = width;
        if let Some(height) = height {
            self.dimensions.height = height;
        }
    }

    /// Where the text lands on the canvas.
    pub fn text_dest(&self) -> Rect {
        let center_x = self.dimensions.width / 2.0;
        Rect::new(
            (center_x - GAME_OVER_TEXT_WIDTH / 2.0).round(),
            ((self.dimensions.height - 25.0) / 3.0).round(),
            GAME_OVER_TEXT_WIDTH,
            GAME_OVER_TEXT_HEIGHT,
        )
    }

    pub fn restart_dest(&self) -> Rect {
        Rect::new(
            self.dimensions.width / 2.0 - RESTART_WIDTH / 2.0,
            self.dimensions.height / 2.0,
            RESTART_WIDTH,
            RESTART_HEIGHT,
        )
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        let text_source = resolution.scale_source(Rect::new(
            GAME_OVER_TEXT_X,
            GAME_OVER_TEXT_Y,
            GAME_OVER_TEXT_WIDTH,
            GAME_OVER_TEXT_HEIGHT,
        ));
        canvas.draw(Blit::new(Sprite::Text, text_source, self.text_dest()));

        let restart_source =
            resolution.scale_source(Rect::new(0.0, 0.0, RESTART_WIDTH, RESTART_HEIGHT));
        canvas.draw(Blit::new(Sprite::Restart, restart_source, self.restart_dest()));
    }
}
