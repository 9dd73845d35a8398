use crate::ArmModel;

/// Static per-model bounds, all arrays parallel to `joints`.
///
/// Invariant: every array has length equal to the model's joint count.
pub struct LimitTable {
    /// 1-based joint ids, in mechanical order.
    pub joints: &'static [u8],
    pub radians_min: &'static [f64],
    pub radians_max: &'static [f64],
    pub angles_min: &'static [f64],
    pub angles_max: &'static [f64],
    pub positions_min: &'static [f64],
    pub positions_max: &'static [f64],
    pub torques_min: &'static [f64],
    pub torques_max: &'static [f64],
}

static M2_LIMITS: LimitTable = LimitTable {
    joints: &[1, 2, 3, 4],
    radians_min: &[-3.3, -1.9, -1.2, -0.2],
    radians_max: &[3.3, 1.9, 3.3, 1.9],
    angles_min: &[-190.0, -110.0, -70.0, -10.0],
    angles_max: &[190.0, 110.0, 190.0, 100.0],
    positions_min: &[-500.0, -500.0, 0.0, 0.0],
    positions_max: &[500.0, 500.0, 600.0, 90.0],
    torques_min: &[1.0, 1.0, 1.0, 1.0],
    torques_max: &[1000.0, 1000.0, 1000.0, 1000.0],
};

static M3_LIMITS: LimitTable = LimitTable {
    joints: &[1, 2, 3, 4, 5, 6],
    radians_min: &[-3.3, -1.9, -1.2, -1.9, -3.3, -0.2],
    radians_max: &[3.3, 1.9, 3.3, 1.9, 3.3, 1.9],
    angles_min: &[-190.0, -110.0, -70.0, -110.0, -190.0, -10.0],
    angles_max: &[190.0, 110.0, 190.0, 110.0, 190.0, 100.0],
    positions_min: &[-500.0, -500.0, 0.0, -90.0, -180.0, 0.0],
    positions_max: &[500.0, 500.0, 600.0, 90.0, 180.0, 90.0],
    torques_min: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    torques_max: &[1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0],
};

impl ArmModel {
    pub fn limits(self) -> &'static LimitTable {
        match self {
            ArmModel::M2 => &M2_LIMITS,
            ArmModel::M3 => &M3_LIMITS,
        }
    }
}

/// Which bound pair of the table a parameter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitClass {
    Radians,
    Angles,
    Positions,
    Torques,
}

impl LimitClass {
    /// Name used in vector-parameter errors.
    pub fn name(self) -> &'static str {
        match self {
            LimitClass::Radians => "radians",
            LimitClass::Angles => "angles",
            LimitClass::Positions => "positions",
            LimitClass::Torques => "torques",
        }
    }

    /// Name used in scalar-parameter errors.
    pub fn scalar_name(self) -> &'static str {
        match self {
            LimitClass::Radians => "radian",
            LimitClass::Angles => "angle",
            LimitClass::Positions => "position",
            LimitClass::Torques => "torque",
        }
    }
}

impl LimitTable {
    pub fn bounds(&self, class: LimitClass) -> (&'static [f64], &'static [f64]) {
        match class {
            LimitClass::Radians => (self.radians_min, self.radians_max),
            LimitClass::Angles => (self.angles_min, self.angles_max),
            LimitClass::Positions => (self.positions_min, self.positions_max),
            LimitClass::Torques => (self.torques_min, self.torques_max),
        }
    }
}
