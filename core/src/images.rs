use std::fmt;
use std::str::FromStr;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.jpg";

/// Width buckets the image CDN serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    W92,
    W185,
    W300,
    W342,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub const POSTER_SMALL: ImageSize = ImageSize::W185;
    pub const POSTER_MEDIUM: ImageSize = ImageSize::W342;
    pub const POSTER_LARGE: ImageSize = ImageSize::W500;
    pub const BACKDROP_SMALL: ImageSize = ImageSize::W300;
    pub const BACKDROP_MEDIUM: ImageSize = ImageSize::W780;
    pub const BACKDROP_LARGE: ImageSize = ImageSize::W1280;
    pub const LOGO: ImageSize = ImageSize::W92;

    pub fn token(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W185 => "w185",
            ImageSize::W300 => "w300",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w92" => Ok(ImageSize::W92),
            "w185" => Ok(ImageSize::W185),
            "w300" => Ok(ImageSize::W300),
            "w342" => Ok(ImageSize::W342),
            "w500" => Ok(ImageSize::W500),
            "w780" => Ok(ImageSize::W780),
            "w1280" => Ok(ImageSize::W1280),
            "original" => Ok(ImageSize::Original),
            other => Err(format!("unsupported image size '{}'", other)),
        }
    }
}

/// Resolve a relative image path against the CDN base; absent paths map to the placeholder.
pub fn image_url(base: &str, path: Option<&str>, size: ImageSize) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => {
            let base = base.trim_end_matches('/');
            if p.starts_with('/') {
                format!("{}/{}{}", base, size.token(), p)
            } else {
                format!("{}/{}/{}", base, size.token(), p)
            }
        }
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_path() {
        assert_eq!(
            image_url(DEFAULT_IMAGE_BASE_URL, Some("/abc.jpg"), ImageSize::POSTER_LARGE),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(image_url("http://cdn/t/p/", Some("x.png"), ImageSize::Original), "http://cdn/t/p/original/x.png");
    }

    #[test]
    fn missing_path_is_placeholder() {
        assert_eq!(image_url(DEFAULT_IMAGE_BASE_URL, None, ImageSize::W342), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(DEFAULT_IMAGE_BASE_URL, Some("  "), ImageSize::W342), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn size_tokens_parse() {
        assert_eq!("W780".parse::<ImageSize>(), Ok(ImageSize::BACKDROP_MEDIUM));
        assert!("w9999".parse::<ImageSize>().is_err());
    }
}
