use crate::catalog::item::Manhwa;
use crate::catalog::Catalog;

/// Build the bundled sample catalog.
///
/// Twelve well-known titles with full attributes. The loader falls back to
/// this set when no external data source is available, and the test suite
/// uses it as a realistic fixture.
pub fn sample_catalog() -> Catalog {
    Catalog::from_items(sample_items())
}

/// The bundled sample items in catalog order.
pub fn sample_items() -> Vec<Manhwa> {
    vec![
        Manhwa {
            id: "1".to_string(),
            title: "Solo Leveling".to_string(),
            author: "Chugong".to_string(),
            description: "In a world where hunters must battle deadly monsters to protect \
                          humanity, Sung Jin-Woo, the weakest of hunters, finds himself in a \
                          situation that changes his life forever."
                .to_string(),
            genres: vec!["Action".to_string(), "Adventure".to_string(), "Fantasy".to_string()],
            tags: vec![
                "Level up".to_string(),
                "Dungeons".to_string(),
                "Monster battles".to_string(),
            ],
            art_style: "Detailed, Dynamic".to_string(),
            status: "Completed".to_string(),
            release_year: 2018,
            rating: 9.2,
            popularity: 98.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 179,
        },
        Manhwa {
            id: "2".to_string(),
            title: "Tower of God".to_string(),
            author: "SIU".to_string(),
            description: "The story of a boy who enters a mysterious tower, climbing it to \
                          find the girl who entered it before him."
                .to_string(),
            genres: vec![
                "Action".to_string(),
                "Adventure".to_string(),
                "Fantasy".to_string(),
                "Mystery".to_string(),
            ],
            tags: vec![
                "Tower climbing".to_string(),
                "Tests".to_string(),
                "Betrayal".to_string(),
            ],
            art_style: "Unique, Colorful".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2010,
            rating: 8.9,
            popularity: 95.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 550,
        },
        Manhwa {
            id: "3".to_string(),
            title: "The God of High School".to_string(),
            author: "Yongje Park".to_string(),
            description: "A high school student and his friends compete in an epic tournament \
                          borrowing power from the gods and uncovering a mysterious \
                          organization."
                .to_string(),
            genres: vec![
                "Action".to_string(),
                "Martial Arts".to_string(),
                "Supernatural".to_string(),
            ],
            tags: vec![
                "Tournament".to_string(),
                "Gods".to_string(),
                "Friendship".to_string(),
            ],
            art_style: "Clean, Action-focused".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2011,
            rating: 8.5,
            popularity: 90.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 500,
        },
        Manhwa {
            id: "4".to_string(),
            title: "Noblesse".to_string(),
            author: "Son Jeho".to_string(),
            description: "After 820 years of slumber, Cadis Etrama Di Raizel awakens in \
                          modern-day South Korea, starting a new life as a high school \
                          student."
                .to_string(),
            genres: vec![
                "Action".to_string(),
                "Supernatural".to_string(),
                "Comedy".to_string(),
                "School Life".to_string(),
            ],
            tags: vec![
                "Vampires".to_string(),
                "Nobility".to_string(),
                "Friendship".to_string(),
            ],
            art_style: "Elegant, Detailed".to_string(),
            status: "Completed".to_string(),
            release_year: 2007,
            rating: 8.7,
            popularity: 88.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 544,
        },
        Manhwa {
            id: "5".to_string(),
            title: "The Breaker".to_string(),
            author: "Jeon Geuk-Jin".to_string(),
            description: "A martial arts manhwa about a weak high school student who meets a \
                          mysterious martial arts teacher."
                .to_string(),
            genres: vec![
                "Action".to_string(),
                "Martial Arts".to_string(),
                "School Life".to_string(),
            ],
            tags: vec![
                "Training".to_string(),
                "Secret organizations".to_string(),
                "Revenge".to_string(),
            ],
            art_style: "Realistic, Detailed action".to_string(),
            status: "Completed".to_string(),
            release_year: 2007,
            rating: 8.8,
            popularity: 85.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 72,
        },
        Manhwa {
            id: "6".to_string(),
            title: "Sweet Home".to_string(),
            author: "Kim Carnby".to_string(),
            description: "After losing his family, a reclusive high school student is forced \
                          to leave his home when a monster apocalypse threatens to destroy \
                          humanity."
                .to_string(),
            genres: vec![
                "Horror".to_string(),
                "Thriller".to_string(),
                "Supernatural".to_string(),
            ],
            tags: vec![
                "Monsters".to_string(),
                "Survival".to_string(),
                "Humanity".to_string(),
            ],
            art_style: "Gritty, Detailed".to_string(),
            status: "Completed".to_string(),
            release_year: 2017,
            rating: 8.6,
            popularity: 87.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 141,
        },
        Manhwa {
            id: "7".to_string(),
            title: "Omniscient Reader's Viewpoint".to_string(),
            author: "Sing Shong".to_string(),
            description: "A novel reader becomes the sole person who knows how the world will \
                          end and struggles to change the course of the story."
                .to_string(),
            genres: vec!["Action".to_string(), "Adventure".to_string(), "Fantasy".to_string()],
            tags: vec![
                "Apocalypse".to_string(),
                "Novel world".to_string(),
                "Survival game".to_string(),
            ],
            art_style: "Detailed, Expressive".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2020,
            rating: 9.0,
            popularity: 92.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 100,
        },
        Manhwa {
            id: "8".to_string(),
            title: "Bastard".to_string(),
            author: "Kim Carnby".to_string(),
            description: "A boy tries to hide the fact that his father is a serial killer \
                          while attempting to rescue people from becoming his father's next \
                          victims."
                .to_string(),
            genres: vec![
                "Thriller".to_string(),
                "Horror".to_string(),
                "Psychological".to_string(),
            ],
            tags: vec![
                "Serial killers".to_string(),
                "Family".to_string(),
                "Trauma".to_string(),
            ],
            art_style: "Realistic, Expressive".to_string(),
            status: "Completed".to_string(),
            release_year: 2014,
            rating: 8.9,
            popularity: 84.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 94,
        },
        Manhwa {
            id: "9".to_string(),
            title: "Lookism".to_string(),
            author: "Park Tae-jun".to_string(),
            description: "A high school student who is bullied for his appearance wakes up \
                          with two bodies that he can switch between at will."
                .to_string(),
            genres: vec!["Drama".to_string(), "School Life".to_string(), "Comedy".to_string()],
            tags: vec![
                "Appearance".to_string(),
                "Bullying".to_string(),
                "Social hierarchy".to_string(),
            ],
            art_style: "Detailed, Realistic".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2014,
            rating: 8.4,
            popularity: 83.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 400,
        },
        Manhwa {
            id: "10".to_string(),
            title: "The Beginning After the End".to_string(),
            author: "TurtleMe".to_string(),
            description: "A king in his previous life is reborn into a world of magic and \
                          monsters, determined to live his new life to the fullest."
                .to_string(),
            genres: vec!["Action".to_string(), "Adventure".to_string(), "Fantasy".to_string()],
            tags: vec![
                "Reincarnation".to_string(),
                "Magic".to_string(),
                "Coming of age".to_string(),
            ],
            art_style: "Colorful, Detailed".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2018,
            rating: 8.8,
            popularity: 91.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 150,
        },
        Manhwa {
            id: "11".to_string(),
            title: "Eleceed".to_string(),
            author: "Son Jeho".to_string(),
            description: "A story about Jiwoo, a kind-hearted young man with a secret power \
                          to move at supernatural speeds, and a mysterious cat named Kayden."
                .to_string(),
            genres: vec!["Action".to_string(), "Comedy".to_string(), "Supernatural".to_string()],
            tags: vec![
                "Secret powers".to_string(),
                "Cats".to_string(),
                "Training".to_string(),
            ],
            art_style: "Clean, Expressive".to_string(),
            status: "Ongoing".to_string(),
            release_year: 2018,
            rating: 9.1,
            popularity: 89.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 200,
        },
        Manhwa {
            id: "12".to_string(),
            title: "Hardcore Leveling Warrior".to_string(),
            author: "Sehoon Kim".to_string(),
            description: "The story of the former number one ranked player in the game Lucid \
                          Adventure who loses all his powers and items and must start from \
                          scratch."
                .to_string(),
            genres: vec![
                "Action".to_string(),
                "Adventure".to_string(),
                "Fantasy".to_string(),
                "Game".to_string(),
            ],
            tags: vec![
                "Virtual reality".to_string(),
                "Level up".to_string(),
                "Revenge".to_string(),
            ],
            art_style: "Colorful, Game-like".to_string(),
            status: "Completed".to_string(),
            release_year: 2016,
            rating: 8.6,
            popularity: 86.0,
            cover_image: "/placeholder.svg?height=450&width=300".to_string(),
            chapters: 300,
        },
    ]
}
