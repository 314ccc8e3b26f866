//! サイトの固定コンテンツ

/// ナビゲーションのセクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
}

pub const SITE_TITLE: &str = "NIT Rourkela 2000";
pub const SITE_SUBTITLE: &str = "Class Reunion";

pub const SECTIONS: &[Section] = &[
    Section { id: "home", title: "Home" },
    Section { id: "when-where", title: "When & Where" },
    Section { id: "gallery", title: "Gallery" },
    Section { id: "rsvp", title: "RSVP" },
    Section { id: "payment", title: "Payment" },
    Section { id: "accommodation", title: "Accommodation" },
    Section { id: "contact", title: "Contact" },
];

pub fn section(id: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.id == id)
}

/// 日時・会場
pub struct Venue {
    pub date: &'static str,
    pub time: &'static str,
    pub address_lines: &'static [&'static str],
}

pub const VENUE: Venue = Venue {
    date: "Friday, December 26th, 2025",
    time: "6:00 PM - 11:00 PM",
    address_lines: &["NIT Rourkela Campus", "Sector 1", "Rourkela, Odisha 769008"],
};

/// 振込先
pub struct BankDetails {
    pub fields: &'static [(&'static str, &'static str)],
}

pub struct PaymentInfo {
    pub receipt_email: &'static str,
    pub bank: BankDetails,
    pub upi_id: &'static str,
    pub upi_qr_url: &'static str,
    pub note: &'static str,
}

pub const PAYMENT: PaymentInfo = PaymentInfo {
    receipt_email: "nitry2k@gmail.com",
    bank: BankDetails {
        fields: &[
            ("Bank", "State Bank of India"),
            ("Account Name", "NITRAA"),
            ("Account Number", "44133183133"),
            ("IFSC", "SBIN0002109"),
            ("MICR", "769002007"),
            ("SWIFT Code", "SBININBB137"),
            ("Branch Code", "002109"),
            ("Email Contact", "nitry2k@gmail.com"),
        ],
    },
    upi_id: "9692242766@SBI",
    upi_qr_url: "https://drive.google.com/file/d/1kHb2pruGl4zSmeGwJUGFp0AySjKUqkdo/view?usp=sharing",
    note: "Please contact the organizers if you want to pay in installments or one of the above methods does not work for you.",
};

/// 宿泊施設の種類（アイコン選択用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodgingKind {
    Hotel,
    Bed,
    House,
}

impl LodgingKind {
    pub fn icon(&self) -> &'static str {
        match self {
            LodgingKind::Hotel => "🏨",
            LodgingKind::Bed => "🛏",
            LodgingKind::House => "🏠",
        }
    }
}

pub struct Accommodation {
    pub kind: LodgingKind,
    pub name: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub rate: &'static str,
    pub phone: &'static str,
    pub booking_url: &'static str,
}

pub const ACCOMMODATIONS: &[Accommodation] = &[
    Accommodation {
        kind: LodgingKind::Hotel,
        name: "Hotel Mayfair Rourkela",
        description: "Our main venue hotel with special reunion rates.",
        address: "Panposh Road, Rourkela",
        rate: "₹5000/night (Reunion Special)",
        phone: "+91 661 2400500",
        booking_url: "#",
    },
    Accommodation {
        kind: LodgingKind::Bed,
        name: "Hotel Deepti",
        description: "Comfortable accommodations near NIT campus.",
        address: "Civil Township, Rourkela",
        rate: "₹3000/night",
        phone: "+91 661 2400700",
        booking_url: "#",
    },
    Accommodation {
        kind: LodgingKind::House,
        name: "NIT Guest House",
        description: "On-campus accommodation for alumni.",
        address: "NIT Campus, Rourkela",
        rate: "₹2000/night",
        phone: "+91 661 2462021",
        booking_url: "#",
    },
];

pub struct ContactInfo {
    pub email: &'static str,
    pub phone: &'static str,
    pub address_lines: &'static [&'static str],
}

pub const CONTACT: ContactInfo = ContactInfo {
    email: "reunion2025@nitrourkela.ac.in",
    phone: "(+91) 123-4567",
    address_lines: &[
        "NIT Rourkela Alumni Association",
        "National Institute of Technology",
        "Rourkela, Odisha 769008",
    ],
};

pub struct CommitteeMember {
    pub name: &'static str,
    pub role: &'static str,
}

pub const COMMITTEE: &[CommitteeMember] = &[
    CommitteeMember { name: "John Smith", role: "Committee Chair" },
    CommitteeMember { name: "Sarah Johnson", role: "Event Coordinator" },
    CommitteeMember { name: "Michael Brown", role: "Treasurer" },
    CommitteeMember { name: "Emily Davis", role: "Communications" },
];
