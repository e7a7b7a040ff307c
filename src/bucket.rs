// Distance tranche classification.
//
// The five tranches are fixed and ordered; together they cover the whole
// real line, so every finite distance maps to exactly one tranche. Finite
// ranges are closed on their upper bound (a value of exactly 8000 falls in
// `4001-8000`), the lowest tranche is strictly `< 4000`.

/// Tranche boundary constants. Not configurable.
pub const BOUNDS: [f64; 4] = [4000.0, 8000.0, 11000.0, 14000.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Under4000,
    From4001To8000,
    From8001To11000,
    From11001To14000,
    Over14000,
}

impl Bucket {
    pub const COUNT: usize = 5;

    /// All tranches in presentation order.
    pub const ALL: [Bucket; Bucket::COUNT] = [
        Bucket::Under4000,
        Bucket::From4001To8000,
        Bucket::From8001To11000,
        Bucket::From11001To14000,
        Bucket::Over14000,
    ];

    /// Classify a finite distance value into its tranche, per `BOUNDS`.
    ///
    /// The loader rejects non-finite values before they reach this point, so
    /// no error path is needed here.
    pub fn classify(value: f64) -> Bucket {
        if value < BOUNDS[0] {
            Bucket::Under4000
        } else if value <= BOUNDS[1] {
            Bucket::From4001To8000
        } else if value <= BOUNDS[2] {
            Bucket::From8001To11000
        } else if value <= BOUNDS[3] {
            Bucket::From11001To14000
        } else {
            Bucket::Over14000
        }
    }

    /// Position of this tranche in `ALL`, used to index count arrays.
    pub fn index(self) -> usize {
        match self {
            Bucket::Under4000 => 0,
            Bucket::From4001To8000 => 1,
            Bucket::From8001To11000 => 2,
            Bucket::From11001To14000 => 3,
            Bucket::Over14000 => 4,
        }
    }

    /// Display label, identical to the count column header.
    pub fn label(self) -> &'static str {
        match self {
            Bucket::Under4000 => "<4000",
            Bucket::From4001To8000 => "4001-8000",
            Bucket::From8001To11000 => "8001-11000",
            Bucket::From11001To14000 => "11001-14000",
            Bucket::Over14000 => ">14000",
        }
    }

    /// Header of the completion-percentage column paired with this tranche.
    pub fn rate_header(self) -> String {
        format!("Taux de réalisation {}", self.label())
    }
}
