pub mod sdvx;
