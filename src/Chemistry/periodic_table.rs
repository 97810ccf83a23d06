//! Read-only periodic table keyed by atomic number.
//!
//! Only symbols and standard atomic weights are stored; group and period are derived from `Z`.
//! Lanthanides and actinides are reported in group 3.

/// Data of a single element of the periodic table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub z: u32,
    pub symbol: &'static str,
    pub atomic_mass: f64,
    pub group: u32,
    pub period: u32,
}

// (symbol, atomic mass) in order of atomic number
const ELEMENTS: [(&str, f64); 118] = [
    ("H", 1.008),
    ("He", 4.0026),
    ("Li", 6.94),
    ("Be", 9.0122),
    ("B", 10.81),
    ("C", 12.011),
    ("N", 14.007),
    ("O", 15.999),
    ("F", 18.998),
    ("Ne", 20.18),
    ("Na", 22.99),
    ("Mg", 24.305),
    ("Al", 26.982),
    ("Si", 28.085),
    ("P", 30.974),
    ("S", 32.065),
    ("Cl", 35.45),
    ("Ar", 39.948),
    ("K", 39.098),
    ("Ca", 40.078),
    ("Sc", 44.9559),
    ("Ti", 47.867),
    ("V", 50.9415),
    ("Cr", 51.9961),
    ("Mn", 54.938),
    ("Fe", 55.845),
    ("Co", 58.933),
    ("Ni", 58.693),
    ("Cu", 63.546),
    ("Zn", 65.38),
    ("Ga", 69.723),
    ("Ge", 72.63),
    ("As", 74.9216),
    ("Se", 78.971),
    ("Br", 79.904),
    ("Kr", 83.798),
    ("Rb", 85.4678),
    ("Sr", 87.62),
    ("Y", 88.9059),
    ("Zr", 91.224),
    ("Nb", 92.9064),
    ("Mo", 95.95),
    ("Tc", 98.0),
    ("Ru", 101.07),
    ("Rh", 102.906),
    ("Pd", 106.42),
    ("Ag", 107.868),
    ("Cd", 112.414),
    ("In", 114.818),
    ("Sn", 118.71),
    ("Sb", 121.76),
    ("Te", 127.6),
    ("I", 126.904),
    ("Xe", 131.293),
    ("Cs", 132.905),
    ("Ba", 137.327),
    ("La", 138.905),
    ("Ce", 140.116),
    ("Pr", 140.908),
    ("Nd", 144.242),
    ("Pm", 145.0),
    ("Sm", 150.36),
    ("Eu", 151.964),
    ("Gd", 157.25),
    ("Tb", 158.925),
    ("Dy", 162.5),
    ("Ho", 164.930),
    ("Er", 167.259),
    ("Tm", 168.934),
    ("Yb", 173.045),
    ("Lu", 174.967),
    ("Hf", 178.49),
    ("Ta", 180.948),
    ("W", 183.84),
    ("Re", 186.207),
    ("Os", 190.23),
    ("Ir", 192.217),
    ("Pt", 195.084),
    ("Au", 196.967),
    ("Hg", 200.592),
    ("Tl", 204.38),
    ("Pb", 207.2),
    ("Bi", 208.980),
    ("Po", 209.0),
    ("At", 210.0),
    ("Rn", 222.0),
    ("Fr", 223.0),
    ("Ra", 226.0),
    ("Ac", 227.0),
    ("Th", 232.038),
    ("Pa", 231.036),
    ("U", 238.029),
    ("Np", 237.0),
    ("Pu", 244.0),
    ("Am", 243.0),
    ("Cm", 247.0),
    ("Bk", 247.0),
    ("Cf", 251.0),
    ("Es", 252.0),
    ("Fm", 257.0),
    ("Md", 258.0),
    ("No", 259.0),
    ("Lr", 266.0),
    ("Rf", 267.0),
    ("Db", 268.0),
    ("Sg", 269.0),
    ("Bh", 270.0),
    ("Hs", 269.0),
    ("Mt", 278.0),
    ("Ds", 281.0),
    ("Rg", 282.0),
    ("Cn", 285.0),
    ("Nh", 286.0),
    ("Fl", 289.0),
    ("Mc", 290.0),
    ("Lv", 293.0),
    ("Ts", 294.0),
    ("Og", 294.0),
];

// atomic number of the last element of each period
const PERIOD_ENDS: [u32; 7] = [2, 10, 18, 36, 54, 86, 118];

pub const MAX_Z: u32 = 118;

fn period_and_group(z: u32) -> (u32, u32) {
    let mut start = 0;
    for (i, &end) in PERIOD_ENDS.iter().enumerate() {
        if z <= end {
            let period = i as u32 + 1;
            let pos = z - start;
            let group = match period {
                1 => {
                    if pos == 1 {
                        1
                    } else {
                        18
                    }
                }
                2 | 3 => {
                    if pos <= 2 {
                        pos
                    } else {
                        pos + 10
                    }
                }
                4 | 5 => pos,
                // periods 6 and 7 carry the f-block between groups 2 and 4
                _ => match pos {
                    1 | 2 => pos,
                    3..=17 => 3,
                    _ => pos - 14,
                },
            };
            return (period, group);
        }
        start = end;
    }
    (0, 0)
}

/// Looks up an element by its atomic number. Returns None outside 1..=118.
pub fn lookup(z: u32) -> Option<ElementData> {
    if z == 0 || z > MAX_Z {
        return None;
    }
    let (symbol, atomic_mass) = ELEMENTS[(z - 1) as usize];
    let (period, group) = period_and_group(z);
    Some(ElementData {
        z,
        symbol,
        atomic_mass,
        group,
        period,
    })
}

/// Looks up an element by its symbol, e.g. "Fe"
pub fn by_symbol(symbol: &str) -> Option<ElementData> {
    ELEMENTS
        .iter()
        .position(|(s, _)| *s == symbol)
        .and_then(|i| lookup(i as u32 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bounds() {
        assert!(lookup(0).is_none());
        assert!(lookup(119).is_none());
        assert_eq!(lookup(1).unwrap().symbol, "H");
        assert_eq!(lookup(118).unwrap().symbol, "Og");
    }

    #[test]
    fn test_groups_and_periods() {
        let cases = [
            ("H", 1, 1),
            ("He", 18, 1),
            ("C", 14, 2),
            ("Na", 1, 3),
            ("Cl", 17, 3),
            ("Fe", 8, 4),
            ("Xe", 18, 5),
            ("La", 3, 6),
            ("Lu", 3, 6),
            ("Hf", 4, 6),
            ("Rn", 18, 6),
            ("Og", 18, 7),
        ];
        for (symbol, group, period) in cases {
            let data = by_symbol(symbol).unwrap();
            assert_eq!(data.group, group, "group of {}", symbol);
            assert_eq!(data.period, period, "period of {}", symbol);
        }
    }

    #[test]
    fn test_by_symbol() {
        assert_eq!(by_symbol("O").unwrap().z, 8);
        assert_eq!(by_symbol("Mg").unwrap().z, 12);
        assert!(by_symbol("Xx").is_none());
    }
}
