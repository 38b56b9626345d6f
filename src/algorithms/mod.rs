pub mod convex_hull;
pub mod min_enclosing_triangle;
pub mod polygon_ops;
pub mod triangulation;
