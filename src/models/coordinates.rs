pub trait FromCoordinates<T> {
    /// Creates a new instance of the struct from the given coordinates.
    /// # Arguments
    /// * `position` - The coordinates to create the struct from.
    /// # Returns
    /// A new instance of the struct.
    /// # Example
    /// ```
    /// use rs_force_layout::models::Point2D;
    /// use rs_force_layout::models::FromCoordinates;
    ///
    /// let point = Point2D::from_coord((1.0, 2.0));
    /// assert_eq!(point.x, 1.0);
    /// assert_eq!(point.y, 2.0);
    /// ```
    fn from_coord(position: T) -> Self;
}

pub trait ToCoordinates<T> {
    /// Converts the struct to a tuple of coordinates.
    /// # Returns
    /// A tuple of coordinates.
    /// # Example
    /// ```
    /// use rs_force_layout::models::Vector2D;
    /// use rs_force_layout::models::ToCoordinates;
    ///
    /// let vector = Vector2D { x: 1.0, y: 2.0 };
    /// let coordinates = vector.to_coord();
    ///
    /// assert_eq!(coordinates.0, 1.0);
    /// assert_eq!(coordinates.1, 2.0);
    /// ```
    fn to_coord(&self) -> T;
}
