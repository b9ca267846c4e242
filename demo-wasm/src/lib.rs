use tearcloth::{
    ClothError, ClothSession, Command, NoOpStepObserver, Parameter, PointerButton, StrainLevel,
    Vec2,
};
use wasm_bindgen::prelude::*;

fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn button(code: u8) -> PointerButton {
    match code {
        2 => PointerButton::Secondary,
        1 => PointerButton::Auxiliary,
        _ => PointerButton::Primary,
    }
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    session: ClothSession<f32>,
    removed: usize,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<ClothDemo, JsValue> {
        let session = ClothSession::with_defaults(Vec2::new(width, height)).map_err(to_js)?;
        Ok(ClothDemo { session, removed: 0 })
    }

    pub fn update(&mut self, dt: f32) {
        let report = self.session.step(dt, &mut NoOpStepObserver);
        self.removed += report.removed.total();
    }

    /// `button_code` follows `MouseEvent.button`: 0 primary, 1 auxiliary, 2 secondary.
    pub fn pointer_down(&mut self, x: f32, y: f32, button_code: u8) -> Result<(), JsValue> {
        let command = Command::PointerDown { position: Vec2::new(x, y), button: button(button_code) };
        self.session.handle(command).map_err(to_js)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.session.handle(Command::PointerMove { position: Vec2::new(x, y) }).map_err(to_js)
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.session.handle(Command::PointerUp { position: Vec2::new(x, y) }).map_err(to_js)
    }

    pub fn pointer_leave(&mut self) -> Result<(), JsValue> {
        self.session.handle(Command::PointerLeave).map_err(to_js)
    }

    pub fn set_draw_mode(&mut self, on: bool) -> Result<(), JsValue> {
        self.session.handle(Command::SetDrawMode(on)).map_err(to_js)
    }

    pub fn is_drawing(&self) -> bool {
        self.session.draw().is_drawing()
    }

    pub fn set_density(&mut self, density: f32) -> Result<(), JsValue> {
        self.set(Parameter::Density(density))
    }

    pub fn set_tear_multiplier(&mut self, multiplier: f32) -> Result<(), JsValue> {
        self.set(Parameter::TearMultiplier(multiplier))
    }

    pub fn set_wind(&mut self, enabled: bool, angle_degrees: f32, strength: f32, speed: f32) -> Result<(), JsValue> {
        self.set(Parameter::WindEnabled(enabled))?;
        self.set(Parameter::WindAngle(angle_degrees.to_radians()))?;
        self.set(Parameter::WindStrength(strength))?;
        self.set(Parameter::WindSpeed(speed))
    }

    pub fn set_solid_probe(&mut self, solid: bool) -> Result<(), JsValue> {
        self.set(Parameter::SolidProbe(solid))
    }

    pub fn regenerate(&mut self) -> Result<(), JsValue> {
        self.session.handle(Command::Regenerate).map_err(to_js)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.removed = 0;
        self.session.handle(Command::Reset).map_err(to_js)
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.session.handle(Command::Resize { width, height }).map_err(to_js)
    }

    /// Returns flat [ax, ay, bx, by, level, ...] per link; level is 0 safe,
    /// 1 warning, 2 critical.
    pub fn links(&self) -> Vec<f32> {
        let frame = self.session.frame();
        let mut out = Vec::with_capacity(frame.links.len() * 5);
        for link in &frame.links {
            let level = match link.level {
                StrainLevel::Safe => 0.0,
                StrainLevel::Warning => 1.0,
                StrainLevel::Critical => 2.0,
            };
            out.extend_from_slice(&[link.a.x, link.a.y, link.b.x, link.b.y, level]);
        }
        out
    }

    /// Packed `0xRRGGBBAA` color per link, in the same order as `links`.
    pub fn link_colors(&self) -> Vec<u32> {
        self.session.frame().links.iter().map(|l| l.color.to_u32()).collect()
    }

    /// Returns [x, y, radius, solid] or an empty array without a probe.
    pub fn probe(&self) -> Vec<f32> {
        match self.session.frame().probe {
            Some(p) => vec![p.center.x, p.center.y, p.radius, if p.solid { 1.0 } else { 0.0 }],
            None => Vec::new(),
        }
    }

    /// Returns [x0, y0, x1, y1] of the draw guide or an empty array.
    pub fn guide(&self) -> Vec<f32> {
        match self.session.frame().guide {
            Some(g) => vec![g.segment.start.x, g.segment.start.y, g.segment.end.x, g.segment.end.y],
            None => Vec::new(),
        }
    }

    pub fn link_count(&self) -> usize {
        self.session.mesh().link_count()
    }

    /// Links cut or torn since the last reset.
    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn cols(&self) -> usize {
        self.session.mesh().cols()
    }

    pub fn rows(&self) -> usize {
        self.session.mesh().rows()
    }
}

impl ClothDemo {
    fn set(&mut self, param: Parameter<f32>) -> Result<(), JsValue> {
        self.session.handle(Command::Set(param)).map_err(to_js)
    }
}
