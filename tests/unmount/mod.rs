mod unsafe_mode;
mod locations;
