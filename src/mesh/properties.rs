use super::ShapeModel;

/// Kilograms per (km³ · g/cm³).
const KG_PER_KM3_G_CM3: f64 = 1e12;

impl ShapeModel {
    /// Total surface area, in squared mesh units.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.plates().iter().map(|p| p.area).sum()
    }

    /// Enclosed volume, in cubed mesh units.
    ///
    /// Sums the signed volumes `(1/6) * v0 . (v1 x v2)` of the tetrahedra formed
    /// by each face and the origin. Positive for an outward-wound surface.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let signed: f64 = self
            .faces()
            .iter()
            .map(|&[a, b, c]| {
                let v = self.vertices();
                v[a].coords.dot(&v[b].coords.cross(&v[c].coords))
            })
            .sum();
        signed / 6.0
    }

    /// Mass in kilograms for a uniform density in g/cm³, with lengths in km.
    #[must_use]
    pub fn mass(&self, density: f64) -> f64 {
        self.volume() * density * KG_PER_KM3_G_CM3
    }
}
