// Live parameters and the ranges the control surface enforces on them.
// LiveParams is owned by the update loop and only mutated through `set`, which
// snaps and clamps. The kernel never sees it; it reads the derived Uniforms.

/// Numeric controls, in the order the HUD lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    DisplacementIntensity,
    MultiplyIntensity,
    BlendOpacity,
    Rotation,
    OffsetX,
    OffsetY,
    Scale,
}

impl ParamId {
    pub const ALL: [ParamId; 7] = [
        ParamId::DisplacementIntensity,
        ParamId::MultiplyIntensity,
        ParamId::BlendOpacity,
        ParamId::Rotation,
        ParamId::OffsetX,
        ParamId::OffsetY,
        ParamId::Scale,
    ];

    pub fn spec(self) -> ParamSpec {
        match self {
            ParamId::DisplacementIntensity => ParamSpec::new("displacementIntensity", "Disp intensity", 0.0, 0.02, 0.001),
            ParamId::MultiplyIntensity => ParamSpec::new("multiplyIntensity", "Mult intensity", -0.5, 0.5, 0.05),
            ParamId::BlendOpacity => ParamSpec::new("blendOpacity", "Opacity", 0.0, 1.0, 0.05),
            ParamId::Rotation => ParamSpec::new("rotation", "Rotation", -10.0, 10.0, 0.5),
            ParamId::OffsetX => ParamSpec::new("offsetX", "Offset X", -200.0, 200.0, 1.0),
            ParamId::OffsetY => ParamSpec::new("offsetY", "Offset Y", -200.0, 200.0, 1.0),
            ParamId::Scale => ParamSpec::new("scale", "Scale", 0.0, 1.0, 0.01),
        }
    }
}

/// Declared range and step of one numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamSpec {
    pub const fn new(name: &'static str, label: &'static str, min: f32, max: f32, step: f32) -> Self {
        Self { name, label, min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the nearest multiple of `step`.
    pub fn clamp(&self, value: f32) -> f32 {
        let snapped = if self.step > 0.0 {
            (value / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }
}

/// User-controlled values, re-read by the update loop every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveParams {
    pub multiply_enabled: bool,
    pub displacement_enabled: bool,
    pub displacement_intensity: f32,
    pub multiply_intensity: f32,
    pub blend_opacity: f32,
    pub rotation_degrees: f32,
    pub offset_x_pixels: f32,
    pub offset_y_pixels: f32,
    pub scale: f32,
}

impl Default for LiveParams {
    fn default() -> Self {
        Self {
            multiply_enabled: true,
            displacement_enabled: true,
            displacement_intensity: 0.012,
            multiply_intensity: -0.15,
            blend_opacity: 0.95,
            rotation_degrees: -5.0,
            offset_x_pixels: 17.0,
            offset_y_pixels: 70.0,
            scale: 0.45,
        }
    }
}

impl LiveParams {
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::DisplacementIntensity => self.displacement_intensity,
            ParamId::MultiplyIntensity => self.multiply_intensity,
            ParamId::BlendOpacity => self.blend_opacity,
            ParamId::Rotation => self.rotation_degrees,
            ParamId::OffsetX => self.offset_x_pixels,
            ParamId::OffsetY => self.offset_y_pixels,
            ParamId::Scale => self.scale,
        }
    }

    /// Store `value` after clamping it to the control's range and step.
    /// Returns the value actually stored.
    pub fn set(&mut self, id: ParamId, value: f32) -> f32 {
        let v = id.spec().clamp(value);
        let slot = match id {
            ParamId::DisplacementIntensity => &mut self.displacement_intensity,
            ParamId::MultiplyIntensity => &mut self.multiply_intensity,
            ParamId::BlendOpacity => &mut self.blend_opacity,
            ParamId::Rotation => &mut self.rotation_degrees,
            ParamId::OffsetX => &mut self.offset_x_pixels,
            ParamId::OffsetY => &mut self.offset_y_pixels,
            ParamId::Scale => &mut self.scale,
        };
        *slot = v;
        v
    }

    /// Move a control by `steps` increments of its declared step.
    pub fn nudge(&mut self, id: ParamId, steps: f32) -> f32 {
        let spec = id.spec();
        self.set(id, self.get(id) + spec.step * steps)
    }

    /// Copy with every numeric field snapped and clamped to its range.
    pub fn clamped(mut self) -> Self {
        for id in ParamId::ALL {
            self.set(id, self.get(id));
        }
        self
    }
}
