// acrobat_core/src/utils/serde_helpers.rs

/// `Vector3<f64>` as a plain `[x, y, z]` array in TOML.
pub mod vec3_from_array {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(vec: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq([vec.x, vec.y, vec.z].iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f64; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::from(arr))
    }
}

/// `[Vector3<f64>; 3]` as three `[x, y, z]` arrays, one per matrix column.
pub mod columns_from_arrays {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(columns: &[Vector3<f64>; 3], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let arrays: Vec<[f64; 3]> = columns.iter().map(|c| [c.x, c.y, c.z]).collect();
        serializer.collect_seq(arrays.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[Vector3<f64>; 3], D::Error>
    where
        D: Deserializer<'de>,
    {
        let arrays: [[f64; 3]; 3] = Deserialize::deserialize(deserializer)?;
        Ok(arrays.map(Vector3::from))
    }
}
