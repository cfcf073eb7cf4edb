use crate::base::GenError;

/// A parsed Wyckoff/cell-filling coordinate component, e.g. `"-x+0.5"` or
/// `"0.25"`.
///
/// Parsed once into a compact `(coefficient_x, coefficient_y, coefficient_z,
/// constant)` form rather than re-parsing strings every time a position is
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coeff_x: f64,
    pub coeff_y: f64,
    pub coeff_z: f64,
    pub constant: f64,
}

impl Term {
    pub fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.coeff_x * x + self.coeff_y * y + self.coeff_z * z + self.constant
    }

    /// Parse one comma-separated component of a Wyckoff/cell-filling
    /// template string.
    ///
    /// Grammar: signed-rational atoms, an optional single variable in
    /// `{x, y, z}`, implicit multiplication between a coefficient and a
    /// variable, and `+`/`-`-concatenation of terms. No parentheses.
    /// Rational constants may additionally be given as `"num/den"`, e.g.
    /// `"1/4,1/4,1/4"`.
    pub fn parse(component: &str) -> Result<Self, GenError> {
        let component: String = component.chars().filter(|c| !c.is_whitespace()).collect();
        if component.is_empty() {
            return Err(GenError::BadTemplate);
        }

        let mut coeff_x = 0.0;
        let mut coeff_y = 0.0;
        let mut coeff_z = 0.0;
        let mut constant = 0.0;

        // Split into signed atoms, keeping the leading sign attached to the
        // first atom.
        let mut atoms: Vec<(f64, String)> = vec![];
        let mut sign = 1.0;
        let mut current = String::new();
        for c in component.chars() {
            match c {
                '+' => {
                    if current.is_empty() {
                        return Err(GenError::BadTemplate);
                    }
                    atoms.push((sign, std::mem::take(&mut current)));
                    sign = 1.0;
                }
                '-' => {
                    if !current.is_empty() {
                        atoms.push((sign, std::mem::take(&mut current)));
                    }
                    sign = -1.0;
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            atoms.push((sign, current));
        } else if atoms.is_empty() {
            return Err(GenError::BadTemplate);
        }

        for (atom_sign, atom) in atoms {
            let last = atom.chars().last().ok_or(GenError::BadTemplate)?;
            match last {
                'x' | 'y' | 'z' => {
                    let coeff_str = &atom[..atom.len() - 1];
                    let coeff = if coeff_str.is_empty() {
                        1.0
                    } else {
                        coeff_str.parse::<f64>().map_err(|_| GenError::BadTemplate)?
                    };
                    let signed = atom_sign * coeff;
                    match last {
                        'x' => coeff_x += signed,
                        'y' => coeff_y += signed,
                        'z' => coeff_z += signed,
                        _ => unreachable!(),
                    }
                }
                _ => {
                    let value = if let Some((num, den)) = atom.split_once('/') {
                        let num: f64 = num.parse().map_err(|_| GenError::BadTemplate)?;
                        let den: f64 = den.parse().map_err(|_| GenError::BadTemplate)?;
                        num / den
                    } else {
                        atom.parse::<f64>().map_err(|_| GenError::BadTemplate)?
                    };
                    constant += atom_sign * value;
                }
            }
        }

        Ok(Self {
            coeff_x,
            coeff_y,
            coeff_z,
            constant,
        })
    }

    /// True iff no free variable appears, i.e. this component is a plain
    /// number (part of what makes a Wyckoff orbit "unique").
    pub fn is_numeric(&self) -> bool {
        self.coeff_x == 0.0 && self.coeff_y == 0.0 && self.coeff_z == 0.0
    }
}

/// A parsed `"x,y,z"`-style coordinate triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateTriple {
    pub x: Term,
    pub y: Term,
    pub z: Term,
}

impl TemplateTriple {
    pub fn parse(template: &str) -> Result<Self, GenError> {
        let parts: Vec<&str> = template.split(',').collect();
        if parts.len() != 3 {
            return Err(GenError::BadTemplate);
        }
        Ok(Self {
            x: Term::parse(parts[0])?,
            y: Term::parse(parts[1])?,
            z: Term::parse(parts[2])?,
        })
    }

    pub fn eval(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (self.x.eval(x, y, z), self.y.eval(x, y, z), self.z.eval(x, y, z))
    }

    /// A triple is "unique" (site-symmetric) iff none of its three
    /// components carry a free variable.
    pub fn is_unique(&self) -> bool {
        self.x.is_numeric() && self.y.is_numeric() && self.z.is_numeric()
    }
}
