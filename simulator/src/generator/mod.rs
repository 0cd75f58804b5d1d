pub mod triangles;
